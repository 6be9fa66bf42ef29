//! Canned reply texts sent by the agent.
//!
//! The welcome and apology texts are only defaults; both can be overridden
//! through configuration (see [`crate::base::config`]).

/// Sent once when members are added to a conversation.
pub const WELCOME: &str = "Welcome to the empty agent! This agent is designed to be a starting point for your own agent development.";

/// Reply to the `hello` command.
pub const HELLO: &str = "Hello!";

/// Reply to the `leave` command.
pub const LEAVE: &str = "Leaving call now. Thank you!";

/// Sent by the error boundary when a handler fails.
pub const APOLOGY: &str = "The bot encountered an error or bug.";

/// Acknowledgement for `application/vnd.microsoft.meetingStart`.
pub const MEETING_START: &str = "📅 Meeting has started! Welcome everyone to the meeting. I'm here to assist during your session.";

/// Acknowledgement for `application/vnd.microsoft.meetingEnd`.
pub const MEETING_END: &str = "🏁 Meeting has ended! Thank you for participating. Have a great day!";

/// Acknowledgement for `application/vnd.microsoft.meetingParticipantJoin`.
pub const PARTICIPANTS_JOIN: &str = "👥 New participants joined the meeting!";

/// Acknowledgement for `application/vnd.microsoft.meetingParticipantLeave`.
pub const PARTICIPANTS_LEAVE: &str = "👋 Participants left the meeting.";

/// Formats the echo reply for any message without a more specific handler.
pub fn echo(text: &str) -> String {
    format!("you said: {text}")
}
