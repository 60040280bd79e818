//! CLI interface using clap
//!
//! Provides the command-line interface for changelog-notifier

mod commands;

pub use commands::*;

use crate::config::{DeliveryMode, NotifierConfig, CONFIG_FILE};
use crate::source::{ChangelogSource, FileSource, HttpSource};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// changelog-notifier - Post new changelog entries to Slack
#[derive(Parser, Debug)]
#[command(name = "changelog-notifier")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the changelog and deliver new versions
    Run(RunArgs),

    /// Show the message for a version without sending it
    Preview(PreviewArgs),

    /// Show the cached snapshot state
    Status(StatusArgs),
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Where to read the changelog from
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Changelog URL
    #[arg(long, env = "CHANGELOG_URL")]
    pub url: Option<String>,

    /// Read the changelog from a local file instead
    #[arg(short, long, conflicts_with = "url")]
    pub file: Option<PathBuf>,
}

impl SourceArgs {
    /// Build the changelog source, falling back to the configured URL
    pub fn source(&self, config: &NotifierConfig) -> Box<dyn ChangelogSource> {
        match (&self.file, &self.url) {
            (Some(path), _) => Box::new(FileSource::new(path)),
            (None, Some(url)) => Box::new(HttpSource::new(url)),
            (None, None) => Box::new(HttpSource::new(&config.changelog_url)),
        }
    }
}

/// Arguments for run command
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Snapshot file
    #[arg(long, env = "CHANGELOG_CACHE")]
    pub cache: Option<PathBuf>,

    /// Delivery mode (inferred from credentials when omitted)
    #[arg(short, long, value_enum)]
    pub mode: Option<DeliveryMode>,

    /// Fail when the delivery credential is missing
    #[arg(long)]
    pub strict: bool,

    /// Slack bot token
    #[arg(long, env = "SLACK_BOT_TOKEN", hide_env_values = true)]
    pub slack_token: Option<String>,

    /// Slack channel ID
    #[arg(long, env = "SLACK_CHANNEL")]
    pub slack_channel: Option<String>,

    /// Slack incoming webhook URL
    #[arg(long, env = "SLACK_WEBHOOK_URL", hide_env_values = true)]
    pub webhook_url: Option<String>,
}

impl RunArgs {
    /// Overlay command-line and environment values on the file configuration
    pub fn apply(&self, config: &mut NotifierConfig) {
        if let Some(ref url) = self.source.url {
            config.changelog_url = url.clone();
        }
        if let Some(ref cache) = self.cache {
            config.cache_path = Some(cache.clone());
        }

        let delivery = &mut config.delivery;
        if self.mode.is_some() {
            delivery.mode = self.mode;
        }
        if self.strict {
            delivery.strict_on_missing_credential = true;
        }
        if self.slack_token.is_some() {
            delivery.slack_token = self.slack_token.clone();
        }
        if self.slack_channel.is_some() {
            delivery.slack_channel = self.slack_channel.clone();
        }
        if self.webhook_url.is_some() {
            delivery.webhook_url = self.webhook_url.clone();
        }
    }
}

/// Arguments for preview command
#[derive(Args, Debug)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Version to preview (defaults to the newest)
    #[arg(short, long)]
    pub release: Option<String>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Snapshot file
    #[arg(long, env = "CHANGELOG_CACHE")]
    pub cache: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
