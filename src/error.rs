//! Run-level error type

use crate::delivery::DeliveryError;
use crate::source::FetchError;
use std::path::PathBuf;

/// Errors that abort a notifier run
#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    /// The changelog could not be fetched
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A message could not be delivered
    #[error(transparent)]
    Delivery(DeliveryError),

    /// No usable delivery credential in strict mode
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The cached snapshot could not be read or written
    #[error("cache error at {path:?}: {source}")]
    Cache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<DeliveryError> for NotifierError {
    fn from(err: DeliveryError) -> Self {
        match err {
            DeliveryError::MissingCredential(what) => NotifierError::Configuration(format!(
                "no {} configured, message printed instead of sent",
                what
            )),
            other => NotifierError::Delivery(other),
        }
    }
}

/// Result alias for notifier operations
pub type Result<T> = std::result::Result<T, NotifierError>;
