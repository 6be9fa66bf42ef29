//! Exact-text commands.

use tracing::{info, instrument};

use crate::{
    base::{replies, types::Res},
    router::TurnContext,
};

/// Replies to `hello`.
#[instrument(skip_all)]
pub async fn handle_hello(context: TurnContext) -> Res<bool> {
    info!("Received hello command on {}.", context.activity().channel_id);

    context.send_activity(replies::HELLO).await?;

    Ok(true)
}

/// Replies to `leave`.
#[instrument(skip_all)]
pub async fn handle_leave(context: TurnContext) -> Res<bool> {
    info!("Received leave command on {}.", context.activity().channel_id);

    context.send_activity(replies::LEAVE).await?;

    Ok(true)
}
