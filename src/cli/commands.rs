//! Command implementations

use super::OutputFormat;
use crate::cache::{snapshot_digest, FileSnapshotStore, SnapshotStore};
use crate::changelog::{parse, VersionEntry};
use crate::config::NotifierConfig;
use crate::delivery::build_delivery;
use crate::message::{format, FormattedMessage};
use crate::notifier::{Notifier, RunReport};
use crate::source::ChangelogSource;
use anyhow::{Context, Result};
use std::path::Path;

/// Run one notifier pass
pub async fn run(config: &NotifierConfig, source: Box<dyn ChangelogSource>) -> Result<RunReport> {
    let cache_path = config.cache_path();
    tracing::debug!("Using snapshot {:?}", cache_path);

    let delivery = build_delivery(&config.delivery);
    let notifier = Notifier::new(
        source,
        Box::new(FileSnapshotStore::new(&cache_path)),
        delivery,
    );

    let report = notifier.run().await.context("Notifier run failed")?;

    if report.is_empty() {
        tracing::info!("Nothing to announce");
    } else {
        tracing::info!("Announced {}", report.delivered.join(", "));
    }

    Ok(report)
}

/// Show the message for one version without delivering it
pub async fn preview(
    source: Box<dyn ChangelogSource>,
    release: Option<&str>,
    output: OutputFormat,
) -> Result<()> {
    let document = source
        .fetch()
        .await
        .with_context(|| format!("Failed to load changelog from {}", source.describe()))?;

    let entries = parse(&document);
    let entry = select_entry(&entries, release)?;
    let message = format(entry);

    match output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&message.to_payload())?;
            println!("{}", json);
        }
        OutputFormat::Text => print_message_text(&message),
    }

    Ok(())
}

/// Pick the requested version, or the newest one
fn select_entry<'a>(entries: &'a [VersionEntry], release: Option<&str>) -> Result<&'a VersionEntry> {
    match release {
        Some(version) => entries
            .iter()
            .find(|e| e.version == version)
            .ok_or_else(|| anyhow::anyhow!("Version not found in changelog: {}", version)),
        None => entries
            .first()
            .ok_or_else(|| anyhow::anyhow!("Changelog contains no version entries")),
    }
}

/// Show the cached snapshot state
pub fn status(cache_path: &Path) -> Result<()> {
    let store = FileSnapshotStore::new(cache_path);

    println!("changelog-notifier Status");
    println!("=========================\n");
    println!("Snapshot: {:?}", store.path());

    let Some(snapshot) = store.load().context("Failed to read snapshot")? else {
        println!("\nNo cached snapshot yet. The next run announces the newest version only.");
        return Ok(());
    };

    let entries = parse(&snapshot);

    println!("SHA-256: {}", snapshot_digest(&snapshot));
    println!("Size: {} bytes", snapshot.len());
    println!("Versions: {}", entries.len());
    if let Some(newest) = entries.first() {
        println!("Newest version: {}", newest.version);
    }

    Ok(())
}

/// Print a message in a terminal-friendly form
pub fn print_message_text(message: &FormattedMessage) {
    println!("{}", message.header);
    println!("{}\n", message.intro);

    for section in &message.sections {
        println!("{}\n", section.text);
    }

    println!("{}", message.footer);
}
