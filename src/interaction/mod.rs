//! The agent's activity handlers.
//!
//! This module holds the concrete registrations of the agent:
//! - Welcoming new conversation members
//! - The `hello` and `leave` text commands, and echoing everything else
//! - Acknowledging Teams meeting events
//! - Apologizing when a handler fails
//!
//! [`register`] builds the routing table in its fixed precedence order.

pub mod command;
pub mod error;
pub mod meeting_event;
pub mod members_added;
pub mod message;

use tracing::instrument;

use crate::{
    base::{activity::kinds, config::Config, types::Res},
    router::{ConversationUpdate, Router},
};

/// Builds the agent's router.
///
/// Order matters: the text commands are registered before the catch-all
/// message handler so they take precedence.
#[instrument(skip_all)]
pub fn register(config: &Config) -> Res<Router> {
    let mut builder = Router::builder();

    let welcome = config.clone();
    builder.conversation_update(ConversationUpdate::MembersAdded, move |context| members_added::handle_members_added(context, welcome.clone()));

    builder.message(r"^hello$", command::handle_hello)?;
    builder.message(r"^leave$", command::handle_leave)?;

    builder.activity(kinds::MESSAGE, message::handle_message);
    builder.activity(kinds::EVENT, meeting_event::handle_event_activity);

    let apology = config.clone();
    builder.on_error(move |context, err| error::handle_turn_error(context, err, apology.clone()));

    Ok(builder.build())
}

// Tests.
