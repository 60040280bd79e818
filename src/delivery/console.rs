//! Printing transport used for dry runs and missing credentials

use super::{Delivery, DeliveryAck, DeliveryError};
use crate::message::FormattedMessage;

/// Prints the message payload instead of sending it
pub struct ConsoleDelivery {
    /// Credential whose absence forced this transport
    missing: Option<&'static str>,
    strict: bool,
}

impl ConsoleDelivery {
    /// Print to stdout and always succeed
    pub fn stdout() -> Self {
        Self {
            missing: None,
            strict: false,
        }
    }

    /// Print to stderr in place of a transport lacking its credential.
    ///
    /// With `strict` set the delivery fails after printing.
    pub fn missing_credential(what: &'static str, strict: bool) -> Self {
        Self {
            missing: Some(what),
            strict,
        }
    }
}

#[async_trait::async_trait]
impl Delivery for ConsoleDelivery {
    async fn deliver(&self, message: &FormattedMessage) -> Result<DeliveryAck, DeliveryError> {
        let payload = serde_json::to_string_pretty(&message.to_payload())
            .unwrap_or_else(|_| message.fallback_text());

        match self.missing {
            None => println!("{}", payload),
            Some(what) => {
                eprintln!("No {} set, message for v{}:", what, message.version);
                eprintln!("{}", payload);

                if self.strict {
                    return Err(DeliveryError::MissingCredential(what));
                }
            }
        }

        Ok(DeliveryAck::default())
    }

    fn name(&self) -> &'static str {
        "console"
    }
}
