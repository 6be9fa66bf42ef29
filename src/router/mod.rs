//! Activity routing.
//!
//! A [`Router`] is an ordered, immutable list of handler registrations built
//! once at start-up through a [`RouterBuilder`]. Dispatching an activity tries
//! the matching registrations in order until one reports the activity handled.
//! Dispatch never fails: handler errors and panics are logged and turned into
//! a single reply by the error handler.

pub mod context;
pub mod matcher;

use std::{any::Any, future::Future, panic::AssertUnwindSafe, sync::Arc};

use futures::{FutureExt, future::BoxFuture};
use tracing::{debug, error, info, instrument};

use crate::{
    base::{
        activity::{Activity, kinds},
        replies,
        types::{Err, Res, Void},
    },
    service::reply::ReplyChannel,
};

pub use context::TurnContext;
pub use matcher::{ConversationUpdate, Matcher};

// Types.

/// A boxed activity handler; resolves to `true` when the activity was handled.
pub type BoxedHandler = Arc<dyn Fn(TurnContext) -> BoxFuture<'static, Res<bool>> + Send + Sync>;

/// A boxed turn error handler.
pub type BoxedErrorHandler = Arc<dyn Fn(TurnContext, Err) -> BoxFuture<'static, Void> + Send + Sync>;

// Structs.

struct Registration {
    matcher: Matcher,
    handler: BoxedHandler,
}

/// Collects registrations in order; freeze with [`RouterBuilder::build`].
#[derive(Default)]
pub struct RouterBuilder {
    registrations: Vec<Registration>,
    error_handler: Option<BoxedErrorHandler>,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler under an arbitrary matcher.
    pub fn add<F, Fut>(&mut self, matcher: Matcher, handler: F) -> &mut Self
    where
        F: Fn(TurnContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Res<bool>> + Send + 'static,
    {
        let handler: BoxedHandler = Arc::new(move |context: TurnContext| handler(context).boxed());
        self.registrations.push(Registration { matcher, handler });
        self
    }

    /// Handles every activity of the given type.
    pub fn activity<F, Fut>(&mut self, kind: &str, handler: F) -> &mut Self
    where
        F: Fn(TurnContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Res<bool>> + Send + 'static,
    {
        self.add(Matcher::kind(kind), handler)
    }

    /// Handles `message` activities whose text matches `pattern` in full.
    pub fn message<F, Fut>(&mut self, pattern: &str, handler: F) -> Res<&mut Self>
    where
        F: Fn(TurnContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Res<bool>> + Send + 'static,
    {
        let matcher = Matcher::kind(kinds::MESSAGE).with_text(pattern)?;
        Ok(self.add(matcher, handler))
    }

    /// Handles `event` activities with the given name.
    pub fn event<F, Fut>(&mut self, name: &str, handler: F) -> &mut Self
    where
        F: Fn(TurnContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Res<bool>> + Send + 'static,
    {
        self.add(Matcher::kind(kinds::EVENT).with_name(name), handler)
    }

    /// Handles `conversationUpdate` activities with a non-empty member list.
    pub fn conversation_update<F, Fut>(&mut self, update: ConversationUpdate, handler: F) -> &mut Self
    where
        F: Fn(TurnContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Res<bool>> + Send + 'static,
    {
        self.add(Matcher::kind(kinds::CONVERSATION_UPDATE).with_update(update), handler)
    }

    /// Sets the handler invoked when a registration fails. Replaces any previous one.
    pub fn on_error<F, Fut>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(TurnContext, Err) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Void> + Send + 'static,
    {
        self.error_handler = Some(Arc::new(move |context: TurnContext, err: Err| handler(context, err).boxed()));
        self
    }

    pub fn build(self) -> Router {
        let error_handler = self.error_handler.unwrap_or_else(|| Arc::new(|context: TurnContext, _: Err| default_error_handler(context).boxed()));

        Router {
            inner: Arc::new(RouterInner {
                registrations: self.registrations,
                error_handler,
            }),
        }
    }
}

struct RouterInner {
    registrations: Vec<Registration>,
    error_handler: BoxedErrorHandler,
}

/// The frozen registration table.
///
/// It is designed to be trivially cloneable, so every inbound request can
/// hold its own handle.
#[derive(Clone)]
pub struct Router {
    inner: Arc<RouterInner>,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.inner.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.registrations.is_empty()
    }

    /// Runs one turn for `activity`, sending replies through `reply`.
    #[instrument(skip_all, fields(kind = %activity.kind))]
    pub async fn dispatch(&self, activity: Activity, reply: ReplyChannel) {
        info!(
            "Received activity: type={} name={:?} text={:?} channel_id={}",
            activity.kind, activity.name, activity.text, activity.channel_id
        );

        let context = TurnContext::new(Arc::new(activity), reply);

        match self.route(&context).await {
            Ok(true) => {}
            Ok(false) => info!("Unhandled activity of type {}.", context.activity().kind),
            Err(err) => self.handle_error(context, err).await,
        }
    }

    async fn route(&self, context: &TurnContext) -> Res<bool> {
        for (index, registration) in self.inner.registrations.iter().enumerate() {
            if !registration.matcher.matches(context.activity()) {
                continue;
            }

            debug!("Activity matched registration #{} ({}).", index, registration.matcher);

            let turn = AssertUnwindSafe(async { (registration.handler)(context.clone()).await });
            let handled = turn.catch_unwind().await.map_err(panic_to_error)??;

            if handled {
                return Ok(true);
            }
        }

        Ok(false)
    }

    async fn handle_error(&self, context: TurnContext, err: Err) {
        error!("[on_turn_error] unhandled error: {:?}", err);

        let handler = self.inner.error_handler.clone();
        let turn = AssertUnwindSafe(async move { handler(context, err).await }).catch_unwind();

        match turn.await.map_err(panic_to_error) {
            Ok(Ok(())) => {}
            Ok(Err(e)) | Err(e) => error!("Error handler failed: {:?}", e),
        }
    }
}

/// Sends the stock apology.
async fn default_error_handler(context: TurnContext) -> Void {
    context.send_activity(replies::APOLOGY).await
}

fn panic_to_error(payload: Box<dyn Any + Send>) -> Err {
    let message = if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    };

    anyhow::anyhow!("Handler panicked: {}", message)
}

// Tests.
