//! Library root for `empty-agent`.
//!
//! Empty-agent is a starting point for Teams-style conversational agents. It:
//! - Welcomes members added to a conversation
//! - Answers the `hello` and `leave` commands and echoes other messages
//! - Acknowledges meeting start, end, and participant events
//! - Apologizes, instead of failing the turn, when a handler errors
//!
//! Activities arrive over HTTP, are matched against an ordered table of
//! handler registrations, and replies go back through a reply channel
//! abstraction that can buffer or post to the channel connector.

#[deny(missing_docs)]
pub mod base;
pub mod interaction;
pub mod router;
pub mod runtime;
pub mod service;

#[cfg(test)]
mod testing;

use base::{config::Config, types::Void};
use tracing::info;

/// Public async entry for the binary crate.
///
/// Builds the routing table and serves the activity endpoint until shutdown.
pub async fn start(config: Config) -> Void {
    info!("Starting empty-agent ...");

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config)?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
