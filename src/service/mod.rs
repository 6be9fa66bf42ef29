//! Service integrations for the hosting channel.
//!
//! This module contains the pieces that talk to the outside world:
//! - Reply channels (in-memory buffering, channel connector)
//! - The HTTP host that receives activities
//!
//! Reply channels are defined as a generic trait with concrete implementations,
//! allowing for extensibility and easy testing.

pub mod host;
pub mod reply;
