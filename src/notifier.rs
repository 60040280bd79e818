//! Single-pass changelog notifier
//!
//! A run fetches the changelog, compares it with the cached snapshot,
//! delivers one message per new version (oldest first) and then replaces the
//! snapshot. Any error aborts the run before the snapshot is written, so a
//! failed delivery is retried in full on the next run.

use crate::cache::SnapshotStore;
use crate::changelog::find_new;
use crate::delivery::{Delivery, DeliveryAck};
use crate::error::Result;
use crate::message::format;
use crate::source::ChangelogSource;

/// Outcome of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Versions delivered, in delivery order
    pub delivered: Vec<String>,
    /// Acknowledgements, parallel to `delivered`
    pub acks: Vec<DeliveryAck>,
}

impl RunReport {
    /// Check if anything was delivered
    pub fn is_empty(&self) -> bool {
        self.delivered.is_empty()
    }
}

/// Wires a source, a snapshot store and a delivery transport together
pub struct Notifier {
    source: Box<dyn ChangelogSource>,
    store: Box<dyn SnapshotStore>,
    delivery: Box<dyn Delivery>,
}

impl Notifier {
    /// Create a new notifier
    pub fn new(
        source: Box<dyn ChangelogSource>,
        store: Box<dyn SnapshotStore>,
        delivery: Box<dyn Delivery>,
    ) -> Self {
        Self {
            source,
            store,
            delivery,
        }
    }

    /// Execute one notifier pass
    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("Fetching changelog from {}", self.source.describe());
        let current = self.source.fetch().await?;

        let cached = self.store.load()?;
        if cached.is_none() {
            tracing::info!("No cached changelog, treating this as the first run");
        }

        let mut novel = find_new(&current, cached.as_deref());
        let mut report = RunReport::default();

        if novel.is_empty() {
            tracing::info!("No new versions");
        } else {
            tracing::info!("Found {} new version(s)", novel.len());

            // Oldest first
            novel.reverse();

            for entry in &novel {
                let message = format(entry);
                let ack = self.delivery.deliver(&message).await?;

                tracing::info!(
                    "Delivered v{} via {}{}",
                    entry.version,
                    self.delivery.name(),
                    ack.message_id
                        .as_deref()
                        .map(|id| format!(" ({})", id))
                        .unwrap_or_default()
                );

                report.delivered.push(entry.version.clone());
                report.acks.push(ack);
            }
        }

        self.store.save(&current)?;

        Ok(report)
    }
}
