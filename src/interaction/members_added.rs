use tracing::{info, instrument};

use crate::{
    base::{config::Config, types::Res},
    router::TurnContext,
};

/// Greets the conversation when members join it.
#[instrument(skip_all)]
pub async fn handle_members_added(context: TurnContext, config: Config) -> Res<bool> {
    let activity = context.activity();
    let members = activity.members_added.iter().map(|m| m.id.as_str()).collect::<Vec<_>>();

    info!("Members added to conversation on {}: {:?}", activity.channel_id, members);

    context.send_activity(config.welcome_message.as_str()).await?;

    Ok(true)
}
