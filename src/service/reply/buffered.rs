//! In-memory reply channel.
//!
//! Used for the `expectReplies` delivery mode, where the host returns every
//! reply of the turn in the HTTP response body.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::base::{activity::Activity, types::Void};

use super::{GenericReplyChannel, ReplyChannel};

impl ReplyChannel {
    /// Creates a reply channel that buffers into `buffer`.
    pub fn buffered(buffer: BufferedReplyChannel) -> Self {
        Self { inner: Arc::new(buffer) }
    }
}

/// Collects outbound activities in memory.
#[derive(Clone, Default)]
pub struct BufferedReplyChannel {
    replies: Arc<Mutex<Vec<Activity>>>,
}

impl BufferedReplyChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns everything sent so far.
    pub async fn take(&self) -> Vec<Activity> {
        std::mem::take(&mut *self.replies.lock().await)
    }
}

#[async_trait]
impl GenericReplyChannel for BufferedReplyChannel {
    async fn send_activity(&self, activity: Activity) -> Void {
        self.replies.lock().await.push(activity);
        Ok(())
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_take_drains_in_send_order() {
        let buffer = BufferedReplyChannel::new();
        let channel = ReplyChannel::buffered(buffer.clone());

        channel.send_activity(Activity::message("test", "one")).await.unwrap();
        channel.send_activity(Activity::message("test", "two")).await.unwrap();

        let replies = buffer.take().await;
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].text.as_deref(), Some("one"));
        assert_eq!(replies[1].text.as_deref(), Some("two"));

        assert!(buffer.take().await.is_empty());
    }
}
