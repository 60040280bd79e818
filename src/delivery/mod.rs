//! Message delivery to Slack
//!
//! Three interchangeable transports share one trait:
//! - `ApiTokenDelivery` posts through `chat.postMessage` with a bot token
//! - `WebhookDelivery` posts to an incoming webhook
//! - `ConsoleDelivery` prints the payload instead of sending it

mod console;
mod slack;

pub use console::ConsoleDelivery;
pub use slack::{ApiTokenDelivery, WebhookDelivery, SLACK_API_URL};

use crate::config::{DeliveryConfig, DeliveryMode};
use crate::message::FormattedMessage;

/// Acknowledgement of a delivered message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryAck {
    /// Message identifier, when the transport reports one
    pub message_id: Option<String>,
}

/// Errors delivering a message
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// Non-success HTTP response
    #[error("delivery failed: HTTP {status} - {body}")]
    Status { status: u16, body: String },

    /// The API answered but reported a failure
    #[error("delivery rejected by Slack: {0}")]
    Api(String),

    /// The request never produced a response
    #[error("delivery failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// No credential was configured, so nothing was sent
    #[error("no {0} configured")]
    MissingCredential(&'static str),
}

/// A transport that can deliver formatted messages
#[async_trait::async_trait]
pub trait Delivery: Send + Sync {
    /// Deliver one message
    async fn deliver(&self, message: &FormattedMessage) -> Result<DeliveryAck, DeliveryError>;

    /// Short transport name, for logging
    fn name(&self) -> &'static str;
}

/// Build the delivery transport described by the configuration.
///
/// When the selected mode lacks its credential, the message is printed to
/// stderr instead; in strict mode that run then fails.
pub fn build_delivery(config: &DeliveryConfig) -> Box<dyn Delivery> {
    let strict = config.strict_on_missing_credential;

    match config.resolved_mode() {
        DeliveryMode::ApiToken => match (&config.slack_token, &config.slack_channel) {
            (Some(token), Some(channel)) => Box::new(ApiTokenDelivery::new(token, channel)),
            (None, _) => {
                tracing::warn!("No Slack bot token configured, printing messages instead");
                Box::new(ConsoleDelivery::missing_credential("Slack bot token", strict))
            }
            (Some(_), None) => {
                tracing::warn!("No Slack channel configured, printing messages instead");
                Box::new(ConsoleDelivery::missing_credential("Slack channel", strict))
            }
        },
        DeliveryMode::Webhook => match &config.webhook_url {
            Some(url) => Box::new(WebhookDelivery::new(url)),
            None => {
                tracing::warn!("No Slack webhook URL configured, printing messages instead");
                Box::new(ConsoleDelivery::missing_credential(
                    "Slack webhook URL",
                    strict,
                ))
            }
        },
        DeliveryMode::PrintOnly => {
            if config.mode.is_none() {
                tracing::warn!("No Slack credential configured, printing messages instead");
                Box::new(ConsoleDelivery::missing_credential(
                    "Slack credential",
                    strict,
                ))
            } else {
                Box::new(ConsoleDelivery::stdout())
            }
        }
    }
}
