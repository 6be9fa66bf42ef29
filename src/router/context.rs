//! Per-turn context handed to handlers.

use std::sync::Arc;

use crate::{
    base::{activity::Activity, types::Void},
    service::reply::ReplyChannel,
};

/// The inbound activity plus the means to answer it.
///
/// Cheap to clone; every handler invoked during a turn gets its own copy.
#[derive(Clone)]
pub struct TurnContext {
    activity: Arc<Activity>,
    reply: ReplyChannel,
}

impl TurnContext {
    pub fn new(activity: Arc<Activity>, reply: ReplyChannel) -> Self {
        Self { activity, reply }
    }

    /// The activity being handled.
    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    /// Sends a text reply to the conversation the activity came from.
    pub async fn send_activity(&self, text: impl Into<String>) -> Void {
        let reply = self.activity.create_reply(text);
        self.reply.send_activity(reply).await
    }
}
