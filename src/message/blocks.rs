//! Slack Block Kit types

use serde::Serialize;

/// A layout block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header { text: TextObject },
    Section { text: TextObject },
    Divider,
    Context { elements: Vec<TextObject> },
}

/// A composition text object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    PlainText { text: String, emoji: bool },
    Mrkdwn { text: String },
}

impl TextObject {
    /// Plain text with emoji shortcodes enabled
    pub fn plain(text: &str) -> Self {
        TextObject::PlainText {
            text: text.to_string(),
            emoji: true,
        }
    }

    /// Slack mrkdwn text
    pub fn mrkdwn(text: &str) -> Self {
        TextObject::Mrkdwn {
            text: text.to_string(),
        }
    }
}
