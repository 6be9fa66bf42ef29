//! Reply channel that posts to the channel connector.
//!
//! Replies are sent to the inbound activity's `serviceUrl` using the Bot
//! Framework connector REST shape:
//! `POST {serviceUrl}/v3/conversations/{conversationId}/activities/{replyToId}`.
//! Token acquisition is left to the hosting environment; requests are unauthenticated.

use std::{sync::Arc, time::Duration};

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, instrument};

use crate::base::{
    activity::Activity,
    config::Config,
    types::{Res, Void},
};

use super::{GenericReplyChannel, ReplyChannel};

impl ReplyChannel {
    /// Creates a reply channel that posts to the connector.
    pub fn connector(client: ConnectorReplyChannel) -> Self {
        Self { inner: Arc::new(client) }
    }
}

/// Connector reply channel implementation.
///
/// The underlying HTTP client pools connections, so one instance is built at
/// start-up and cloned per turn.
#[derive(Clone)]
pub struct ConnectorReplyChannel {
    client: reqwest::Client,
}

impl ConnectorReplyChannel {
    /// Create a new connector reply channel.
    pub fn new(config: &Config) -> Res<Self> {
        let client = reqwest::Client::builder().timeout(Duration::from_secs(config.connector_timeout_secs)).build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl GenericReplyChannel for ConnectorReplyChannel {
    #[instrument(skip_all)]
    async fn send_activity(&self, activity: Activity) -> Void {
        let url = activity_url(&activity)?;

        debug!("Posting reply to {}", url);

        let response = self
            .client
            .post(url)
            .json(&activity)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to send reply: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Connector rejected reply with status {}.", status));
        }

        Ok(())
    }
}

/// Builds the connector URL an outbound activity is posted to.
pub fn activity_url(activity: &Activity) -> Res<Url> {
    let service_url = activity.service_url.as_deref().context("Reply has no service URL.")?;
    let conversation_id = activity.conversation.as_ref().map(|c| c.id.as_str()).context("Reply has no conversation.")?;

    let mut url = Url::parse(service_url).with_context(|| format!("Invalid service URL: {service_url}"))?;

    {
        let mut segments = url.path_segments_mut().map_err(|_| anyhow!("Service URL cannot be a base: {}", service_url))?;
        segments.pop_if_empty().extend(["v3", "conversations", conversation_id, "activities"]);

        if let Some(reply_to_id) = &activity.reply_to_id {
            segments.push(reply_to_id);
        }
    }

    Ok(url)
}

// Tests.

#[cfg(test)]
mod tests {
    use crate::base::activity::ConversationAccount;

    use super::*;

    fn reply(service_url: Option<&str>, conversation: Option<&str>, reply_to_id: Option<&str>) -> Activity {
        Activity {
            service_url: service_url.map(str::to_string),
            conversation: conversation.map(|id| ConversationAccount { id: id.to_string(), ..Default::default() }),
            reply_to_id: reply_to_id.map(str::to_string),
            ..Activity::message("msteams", "Hello!")
        }
    }

    #[test]
    fn test_activity_url_with_reply_to() {
        let url = activity_url(&reply(Some("https://smba.example.test/amer/"), Some("conv-1"), Some("act-1"))).unwrap();

        assert_eq!(url.as_str(), "https://smba.example.test/amer/v3/conversations/conv-1/activities/act-1");
    }

    #[test]
    fn test_activity_url_without_reply_to() {
        let url = activity_url(&reply(Some("http://localhost:3979"), Some("conv-1"), None)).unwrap();

        assert_eq!(url.as_str(), "http://localhost:3979/v3/conversations/conv-1/activities");
    }

    #[test]
    fn test_activity_url_encodes_conversation_id() {
        let url = activity_url(&reply(Some("https://smba.example.test/"), Some("team/general#1"), None)).unwrap();

        assert_eq!(url.as_str(), "https://smba.example.test/v3/conversations/team%2Fgeneral%231/activities");
    }

    #[test]
    fn test_activity_url_requires_addressing() {
        assert!(activity_url(&reply(None, Some("conv-1"), None)).is_err());
        assert!(activity_url(&reply(Some("https://smba.example.test/"), None, None)).is_err());
    }
}
