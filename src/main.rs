//! changelog-notifier - Changelog to Slack notifier
//!
//! Fetches a changelog, finds versions released since the last run and posts
//! one Slack message per new version.

use anyhow::Result;
use changelog_notifier::cli::{preview, run, status, Cli, Commands};
use changelog_notifier::config::NotifierConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut config = NotifierConfig::load_or_default(&cli.config)?;

    // Execute command
    match cli.command {
        Commands::Run(args) => {
            args.apply(&mut config);
            let source = args.source.source(&config);
            run(&config, source).await?;
        }

        Commands::Preview(args) => {
            let source = args.source.source(&config);
            preview(source, args.release.as_deref(), args.format).await?;
        }

        Commands::Status(args) => {
            let cache_path = args.cache.or(config.cache_path).unwrap_or_else(
                changelog_notifier::cache::default_cache_path,
            );
            status(&cache_path)?;
        }
    }

    Ok(())
}
