//! Teams meeting event acknowledgements.
//!
//! Meeting lifecycle notifications arrive as `event` activities whose name
//! identifies the kind of notification and whose value carries the meeting
//! details. The set of names is fixed, so this is a plain match.

use tracing::{info, instrument, warn};

use crate::{
    base::{activity::meeting_events, replies, types::Res},
    router::TurnContext,
};

/// Handles every `event` activity.
///
/// Known meeting events get a fixed acknowledgement. Anything else is logged
/// and considered handled without a reply.
#[instrument(skip_all)]
pub async fn handle_event_activity(context: TurnContext) -> Res<bool> {
    let activity = context.activity();

    info!(
        "Event activity: type={} name={:?} channel_id={} value={}",
        activity.kind,
        activity.name,
        activity.channel_id,
        activity.value.as_ref().map(|v| v.to_string()).unwrap_or_else(|| "null".to_string())
    );

    let reply = match activity.name.as_deref() {
        Some(meeting_events::START) => {
            info!("Meeting start event received.");
            replies::MEETING_START
        }
        Some(meeting_events::END) => {
            info!("Meeting end event received.");
            replies::MEETING_END
        }
        Some(meeting_events::PARTICIPANT_JOIN) => {
            info!("Participants joined event received.");
            replies::PARTICIPANTS_JOIN
        }
        Some(meeting_events::PARTICIPANT_LEAVE) => {
            info!("Participants left event received.");
            replies::PARTICIPANTS_LEAVE
        }
        _ => {
            warn!("Unhandled event activity: {:?}", activity.name);
            return Ok(true);
        }
    };

    context.send_activity(reply).await?;

    Ok(true)
}
