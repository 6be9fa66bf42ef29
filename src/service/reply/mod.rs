pub mod buffered;
pub mod connector;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::{activity::Activity, types::Void};

// Traits.

/// Generic "reply" trait that outbound channels must implement.
///
/// A reply channel is the only way a handler talks back to the user. It carries
/// no identity beyond the turn it was created for.
#[async_trait]
pub trait GenericReplyChannel: Send + Sync + 'static {
    /// Send one outbound activity associated with the current turn.
    async fn send_activity(&self, activity: Activity) -> Void;
}

// Structs.

/// Reply channel for a single turn.
///
/// It is designed to be trivially cloneable, allowing it to be handed to
/// handlers without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ReplyChannel {
    inner: Arc<dyn GenericReplyChannel>,
}

impl Deref for ReplyChannel {
    type Target = dyn GenericReplyChannel;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ReplyChannel {
    pub fn new(inner: Arc<dyn GenericReplyChannel>) -> Self {
        Self { inner }
    }
}
