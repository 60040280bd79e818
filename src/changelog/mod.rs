//! Changelog parsing and novelty detection
//!
//! This module handles:
//! - Splitting a raw changelog into version entries
//! - Comparing a fresh changelog against the cached snapshot

mod diff;

pub use diff::{find_new, versions};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Level-2 heading carrying a `X.Y.Z` version, optionally bracketed.
///
/// The version must end at a bracket, whitespace or the end of the line, so
/// pre-releases like `1.2.3-beta.1` are not keyed as `1.2.3`.
static VERSION_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^## \[?(\d+\.\d+\.\d+)(?:\]|\s|$)").unwrap()
});

/// One changelog section keyed by its version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    /// Version string, e.g. "1.2.3"
    pub version: String,
    /// Raw section text, heading included
    pub body: String,
}

impl VersionEntry {
    /// Create a new version entry
    pub fn new(version: &str, body: &str) -> Self {
        Self {
            version: version.to_string(),
            body: body.to_string(),
        }
    }
}

/// Split a changelog document into version entries, in document order.
///
/// Each entry spans from its heading up to the next version heading (or the
/// end of the document). Text before the first heading and headings that do
/// not carry a well-formed version are ignored.
pub fn parse(document: &str) -> Vec<VersionEntry> {
    let headings: Vec<(usize, &str)> = VERSION_HEADING
        .captures_iter(document)
        .filter_map(|caps| {
            let start = caps.get(0)?.start();
            let version = caps.get(1)?.as_str();
            Some((start, version))
        })
        .collect();

    let mut entries = Vec::with_capacity(headings.len());

    for (i, (start, version)) in headings.iter().enumerate() {
        let end = headings
            .get(i + 1)
            .map(|(next, _)| *next)
            .unwrap_or(document.len());

        entries.push(VersionEntry::new(version, document[*start..end].trim()));
    }

    tracing::debug!("Parsed {} version entries", entries.len());

    entries
}
