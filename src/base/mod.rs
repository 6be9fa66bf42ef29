//! Core components, types, and utilities for the empty-agent.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - The activity model exchanged with the hosting channel.
//! - Canned reply texts.
//! - Common types and result handling.

pub mod activity;
pub mod config;
pub mod replies;
pub mod types;
