use tracing::{info, instrument};

use crate::{
    base::{replies, types::Res},
    router::TurnContext,
};

/// Echoes any message that no command claimed.
#[instrument(skip_all)]
pub async fn handle_message(context: TurnContext) -> Res<bool> {
    let activity = context.activity();

    info!("Message activity: type={} text={:?} channel_id={}", activity.kind, activity.text, activity.channel_id);

    let reply = replies::echo(activity.text.as_deref().unwrap_or_default());
    context.send_activity(reply).await?;

    Ok(true)
}
