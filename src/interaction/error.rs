use tracing::{debug, instrument};

use crate::{
    base::{
        config::Config,
        types::{Err, Void},
    },
    router::TurnContext,
};

/// Tells the user something went wrong.
///
/// The router has already logged the failure at error level.
#[instrument(skip_all)]
pub async fn handle_turn_error(context: TurnContext, _err: Err, config: Config) -> Void {
    let activity = context.activity();
    debug!("Sending apology for failed {} activity on {}.", activity.kind, activity.channel_id);

    context.send_activity(config.apology_message.as_str()).await
}
