//! Notifier configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cache::default_cache_path;
use crate::source::DEFAULT_CHANGELOG_URL;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "changelog-notifier.toml";

/// How formatted messages are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryMode {
    /// Slack `chat.postMessage` with a bot token
    ApiToken,
    /// Slack incoming webhook
    Webhook,
    /// Print messages to stdout
    PrintOnly,
}

impl std::fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryMode::ApiToken => write!(f, "api-token"),
            DeliveryMode::Webhook => write!(f, "webhook"),
            DeliveryMode::PrintOnly => write!(f, "print-only"),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// URL of the raw changelog
    #[serde(default = "default_changelog_url")]
    pub changelog_url: String,

    /// Snapshot file (defaults to the user cache directory)
    #[serde(default)]
    pub cache_path: Option<PathBuf>,

    /// Delivery settings
    #[serde(default)]
    pub delivery: DeliveryConfig,
}

/// Delivery configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Explicit mode; inferred from the credentials when unset
    #[serde(default)]
    pub mode: Option<DeliveryMode>,

    /// Fail the run when the selected mode has no credential
    #[serde(default)]
    pub strict_on_missing_credential: bool,

    /// Slack bot token for `api-token` mode
    #[serde(default)]
    pub slack_token: Option<String>,

    /// Channel ID for `api-token` mode
    #[serde(default)]
    pub slack_channel: Option<String>,

    /// Incoming webhook URL for `webhook` mode
    #[serde(default)]
    pub webhook_url: Option<String>,
}

fn default_changelog_url() -> String {
    DEFAULT_CHANGELOG_URL.to_string()
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            changelog_url: default_changelog_url(),
            cache_path: None,
            delivery: DeliveryConfig::default(),
        }
    }
}

impl NotifierConfig {
    /// Load configuration from a TOML file, or return defaults if it is absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: NotifierConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Snapshot file to use
    pub fn cache_path(&self) -> PathBuf {
        self.cache_path.clone().unwrap_or_else(default_cache_path)
    }
}

impl DeliveryConfig {
    /// The explicit mode, or the one implied by the available credentials
    pub fn resolved_mode(&self) -> DeliveryMode {
        if let Some(mode) = self.mode {
            return mode;
        }

        if self.slack_token.is_some() {
            DeliveryMode::ApiToken
        } else if self.webhook_url.is_some() {
            DeliveryMode::Webhook
        } else {
            DeliveryMode::PrintOnly
        }
    }
}
