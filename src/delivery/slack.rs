//! Slack transports

use super::{Delivery, DeliveryAck, DeliveryError};
use crate::message::FormattedMessage;
use serde::Deserialize;

/// Base URL of the Slack Web API
pub const SLACK_API_URL: &str = "https://slack.com/api";

/// Posts through `chat.postMessage` with a bot token
pub struct ApiTokenDelivery {
    token: String,
    channel: String,
    api_url: String,
    client: reqwest::Client,
}

impl ApiTokenDelivery {
    /// Create a delivery for a bot token and channel
    pub fn new(token: &str, channel: &str) -> Self {
        Self {
            token: token.to_string(),
            channel: channel.to_string(),
            api_url: SLACK_API_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Point at a different API base URL
    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Build the request body for a message
    pub fn request_body(&self, message: &FormattedMessage) -> serde_json::Value {
        let mut body = message.to_payload();
        body["channel"] = serde_json::Value::String(self.channel.clone());
        body
    }
}

#[async_trait::async_trait]
impl Delivery for ApiTokenDelivery {
    async fn deliver(&self, message: &FormattedMessage) -> Result<DeliveryAck, DeliveryError> {
        let url = format!("{}/chat.postMessage", self.api_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&self.request_body(message))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Status { status, body });
        }

        let result: PostMessageResponse = response.json().await?;
        result.into_ack()
    }

    fn name(&self) -> &'static str {
        "slack-api"
    }
}

/// Posts to a pre-provisioned incoming webhook
pub struct WebhookDelivery {
    url: String,
    client: reqwest::Client,
}

impl WebhookDelivery {
    /// Create a delivery for a webhook URL
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl Delivery for WebhookDelivery {
    async fn deliver(&self, message: &FormattedMessage) -> Result<DeliveryAck, DeliveryError> {
        let response = self
            .client
            .post(&self.url)
            .json(&message.to_payload())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Status { status, body });
        }

        Ok(DeliveryAck::default())
    }

    fn name(&self) -> &'static str {
        "slack-webhook"
    }
}

// chat.postMessage response

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    ts: Option<String>,
    error: Option<String>,
}

impl PostMessageResponse {
    fn into_ack(self) -> Result<DeliveryAck, DeliveryError> {
        if self.ok {
            Ok(DeliveryAck {
                message_id: self.ts,
            })
        } else {
            Err(DeliveryError::Api(
                self.error.unwrap_or_else(|| "unknown_error".to_string()),
            ))
        }
    }
}
