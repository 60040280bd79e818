//! Slack message construction for changelog entries
//!
//! This module handles:
//! - Classifying changelog bullets into fixed categories
//! - Converting markdown items to Slack mrkdwn
//! - Rendering a formatted message as Block Kit JSON

mod blocks;
mod format;

pub use blocks::{Block, TextObject};
pub use format::{classify, format, render_item, truncate_section};

use serde::Serialize;

/// Longest section text sent as-is
pub const SECTION_LIMIT: usize = 2900;

/// Length a too-long section is cut down to before the marker
pub const SECTION_TRUNCATE_AT: usize = 2850;

/// Appended to truncated sections
pub const TRUNCATION_MARKER: &str = "\n_...and more_";

/// Canonical human-readable changelog page
pub const CHANGELOG_PAGE_URL: &str =
    "https://github.com/anthropics/claude-code/blob/main/CHANGELOG.md";

/// Classification group for a changelog bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    Added,
    Fixed,
    Changed,
    Improved,
    Removed,
    /// Catch-all for bullets matching no other prefix
    Updates,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 6] = [
        Category::Added,
        Category::Fixed,
        Category::Changed,
        Category::Improved,
        Category::Removed,
        Category::Updates,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Added => "Added",
            Category::Fixed => "Fixed",
            Category::Changed => "Changed",
            Category::Improved => "Improved",
            Category::Removed => "Removed",
            Category::Updates => "Updates",
        }
    }

    /// Lowercase prefixes that select this category
    pub(crate) fn prefixes(&self) -> &'static [&'static str] {
        match self {
            Category::Added => &["added", "add ", "new ", "introducing"],
            Category::Fixed => &["fixed", "fix "],
            Category::Changed => &["changed", "change "],
            Category::Improved => &["improved", "improve "],
            Category::Removed => &["removed", "remove "],
            Category::Updates => &[],
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Items collected for one category, in original order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBucket {
    pub category: Category,
    pub items: Vec<String>,
}

impl CategoryBucket {
    /// Create an empty bucket
    pub fn new(category: Category) -> Self {
        Self {
            category,
            items: Vec::new(),
        }
    }

    /// Check if no items landed in this bucket
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A rendered category section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageSection {
    pub category: Category,
    /// mrkdwn text, already length-bounded
    pub text: String,
}

/// A chat message announcing one release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedMessage {
    /// Version the message announces
    pub version: String,
    /// Header block text
    pub header: String,
    /// Introductory sentence
    pub intro: String,
    /// Non-empty category sections in display order
    pub sections: Vec<MessageSection>,
    /// Footer linking to the full changelog
    pub footer: String,
}

impl FormattedMessage {
    /// Plain-text fallback used for notifications
    pub fn fallback_text(&self) -> String {
        format!("Claude Code v{} has been released", self.version)
    }

    /// Find the section for a category, if it has any items
    pub fn section(&self, category: Category) -> Option<&MessageSection> {
        self.sections.iter().find(|s| s.category == category)
    }

    /// Render as Slack Block Kit blocks
    pub fn to_blocks(&self) -> Vec<Block> {
        let mut blocks = Vec::with_capacity(self.sections.len() + 5);

        blocks.push(Block::Header {
            text: TextObject::plain(&self.header),
        });
        blocks.push(Block::Section {
            text: TextObject::mrkdwn(&self.intro),
        });
        blocks.push(Block::Divider);

        for section in &self.sections {
            blocks.push(Block::Section {
                text: TextObject::mrkdwn(&section.text),
            });
        }

        blocks.push(Block::Divider);
        blocks.push(Block::Context {
            elements: vec![TextObject::mrkdwn(&self.footer)],
        });

        blocks
    }

    /// Render as a webhook/chat.postMessage body, without a channel
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "text": self.fallback_text(),
            "blocks": self.to_blocks(),
        })
    }
}
