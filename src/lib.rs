//! changelog-notifier - Changelog to Slack notifier
//!
//! This library parses a changelog into version entries, detects entries
//! that are new since a cached snapshot, and turns each into a categorized
//! Slack message delivered through a pluggable transport.

pub mod cache;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod delivery;
pub mod error;
pub mod message;
pub mod notifier;
pub mod source;

#[cfg(test)]
mod testutil;

/// Re-export commonly used types
pub use changelog::{find_new, parse, VersionEntry};
pub use error::NotifierError;
pub use message::{Category, FormattedMessage};
pub use notifier::{Notifier, RunReport};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "changelog-notifier";
