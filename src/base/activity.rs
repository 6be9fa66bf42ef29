//! The activity model exchanged with the hosting channel.
//!
//! This mirrors the subset of the Bot Framework activity schema the agent
//! reads or writes. Unknown fields are ignored on the way in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Well-known activity types.
pub mod kinds {
    /// A user or bot message.
    pub const MESSAGE: &str = "message";
    /// Membership or conversation metadata changed.
    pub const CONVERSATION_UPDATE: &str = "conversationUpdate";
    /// A named, out-of-band notification.
    pub const EVENT: &str = "event";
}

/// Well-known Teams meeting event names.
pub mod meeting_events {
    /// A meeting started.
    pub const START: &str = "application/vnd.microsoft.meetingStart";
    /// A meeting ended.
    pub const END: &str = "application/vnd.microsoft.meetingEnd";
    /// Participants joined a meeting.
    pub const PARTICIPANT_JOIN: &str = "application/vnd.microsoft.meetingParticipantJoin";
    /// Participants left a meeting.
    pub const PARTICIPANT_LEAVE: &str = "application/vnd.microsoft.meetingParticipantLeave";
}

/// Delivery mode asking for replies in the HTTP response body.
pub const EXPECT_REPLIES: &str = "expectReplies";

/// A user or bot account on a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelAccount {
    /// Channel-specific account id.
    pub id: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The conversation an activity belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationAccount {
    /// Channel-specific conversation id.
    pub id: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the conversation has more than two participants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_group: Option<bool>,
}

/// One inbound or outbound activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Activity type (`message`, `conversationUpdate`, `event`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Channel-assigned activity id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Event name, set on `event` and `invoke` activities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Message text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// The channel the activity travels on (`msteams`, `emulator`, ...).
    #[serde(default)]
    pub channel_id: String,
    /// Opaque payload; meeting details for meeting events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Base URL of the channel connector that replies are posted to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
    /// Sender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ChannelAccount>,
    /// Receiver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<ChannelAccount>,
    /// Conversation the activity belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<ConversationAccount>,
    /// Members that joined, on `conversationUpdate`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members_added: Vec<ChannelAccount>,
    /// Members that left, on `conversationUpdate`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members_removed: Vec<ChannelAccount>,
    /// Id of the activity this one answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
    /// How the sender wants replies delivered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_mode: Option<String>,
    /// When the activity was sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Activity {
    /// Creates a bare activity of the given type on the given channel.
    pub fn new(kind: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            channel_id: channel_id.into(),
            ..Default::default()
        }
    }

    /// Creates a `message` activity with the given text.
    pub fn message(channel_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(kinds::MESSAGE, channel_id)
        }
    }

    /// Creates a named `event` activity carrying an opaque payload.
    pub fn event(channel_id: impl Into<String>, name: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            name: Some(name.into()),
            value,
            ..Self::new(kinds::EVENT, channel_id)
        }
    }

    /// Creates a `conversationUpdate` activity announcing added members.
    pub fn members_added(channel_id: impl Into<String>, members: Vec<ChannelAccount>) -> Self {
        Self {
            members_added: members,
            ..Self::new(kinds::CONVERSATION_UPDATE, channel_id)
        }
    }

    /// Whether the sender asked for replies in the response body.
    pub fn expects_replies(&self) -> bool {
        self.delivery_mode.as_deref() == Some(EXPECT_REPLIES)
    }

    /// Builds a text `message` addressed back to the conversation this activity came from.
    ///
    /// Sender and recipient are swapped, and the reply points at this activity's id.
    pub fn create_reply(&self, text: impl Into<String>) -> Activity {
        Activity {
            kind: kinds::MESSAGE.to_string(),
            text: Some(text.into()),
            channel_id: self.channel_id.clone(),
            service_url: self.service_url.clone(),
            from: self.recipient.clone(),
            recipient: self.from.clone(),
            conversation: self.conversation.clone(),
            reply_to_id: self.id.clone(),
            timestamp: Some(Utc::now()),
            ..Default::default()
        }
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_teams_meeting_event() {
        let activity: Activity = serde_json::from_value(json!({
            "type": "event",
            "id": "f:123",
            "name": "application/vnd.microsoft.meetingStart",
            "channelId": "msteams",
            "serviceUrl": "https://smba.trafficmanager.net/amer/",
            "from": { "id": "29:user", "name": "Ada" },
            "recipient": { "id": "28:bot" },
            "conversation": { "id": "19:meeting", "isGroup": true },
            "value": { "Id": "meeting-1", "Title": "Standup" },
            "channelData": { "tenant": { "id": "t" } }
        }))
        .unwrap();

        assert_eq!(activity.kind, kinds::EVENT);
        assert_eq!(activity.name.as_deref(), Some(meeting_events::START));
        assert_eq!(activity.channel_id, "msteams");
        assert_eq!(activity.conversation.unwrap().is_group, Some(true));
        assert_eq!(activity.value.unwrap()["Title"], "Standup");
    }

    #[test]
    fn test_deserialize_members_added() {
        let activity: Activity = serde_json::from_value(json!({
            "type": "conversationUpdate",
            "channelId": "emulator",
            "membersAdded": [{ "id": "user-1" }, { "id": "bot-1" }]
        }))
        .unwrap();

        assert_eq!(activity.members_added.len(), 2);
        assert!(activity.members_removed.is_empty());
        assert!(activity.text.is_none());
    }

    #[test]
    fn test_create_reply_swaps_addressing() {
        let mut inbound = Activity::message("msteams", "hello");
        inbound.id = Some("a-1".to_string());
        inbound.service_url = Some("https://example.test/".to_string());
        inbound.from = Some(ChannelAccount { id: "user".to_string(), name: None });
        inbound.recipient = Some(ChannelAccount { id: "bot".to_string(), name: None });
        inbound.conversation = Some(ConversationAccount { id: "conv".to_string(), ..Default::default() });

        let reply = inbound.create_reply("Hello!");

        assert_eq!(reply.kind, kinds::MESSAGE);
        assert_eq!(reply.text.as_deref(), Some("Hello!"));
        assert_eq!(reply.from.unwrap().id, "bot");
        assert_eq!(reply.recipient.unwrap().id, "user");
        assert_eq!(reply.reply_to_id.as_deref(), Some("a-1"));
        assert_eq!(reply.conversation.unwrap().id, "conv");
        assert_eq!(reply.service_url.as_deref(), Some("https://example.test/"));
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let activity = Activity::message("emulator", "hi");

        let value = serde_json::to_value(&activity).unwrap();

        assert_eq!(value["type"], "message");
        assert_eq!(value["channelId"], "emulator");
        assert!(value.get("membersAdded").is_none());
        assert!(value.get("name").is_none());
    }
}
