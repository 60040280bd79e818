//! Formatting of a changelog entry into a categorized Slack message

use super::{
    Category, CategoryBucket, FormattedMessage, MessageSection, CHANGELOG_PAGE_URL,
    SECTION_LIMIT, SECTION_TRUNCATE_AT, TRUNCATION_MARKER,
};
use crate::changelog::VersionEntry;
use regex::Regex;
use std::sync::LazyLock;

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").unwrap());

const BULLET: &str = "  • ";

/// Classify a bullet item by its leading word.
///
/// Prefixes are checked case-insensitively in category order, so the first
/// matching category wins. Items matching nothing land in `Updates`.
pub fn classify(item: &str) -> Category {
    let lower = item.to_lowercase();

    Category::ALL
        .into_iter()
        .find(|category| {
            category
                .prefixes()
                .iter()
                .any(|prefix| lower.starts_with(prefix))
        })
        .unwrap_or(Category::Updates)
}

/// Convert markdown emphasis and links to Slack mrkdwn
pub fn render_item(item: &str) -> String {
    let bold = BOLD.replace_all(item, "*${1}*");
    LINK.replace_all(&bold, "<${2}|${1}>").into_owned()
}

/// Bound a section's length, appending a marker when it was cut
pub fn truncate_section(text: &str) -> String {
    if text.chars().count() <= SECTION_LIMIT {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(SECTION_TRUNCATE_AT).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

/// Sort the bullet items of an entry body into category buckets.
///
/// Buckets are returned in display order, including empty ones.
fn categorize(body: &str) -> Vec<CategoryBucket> {
    let mut buckets: Vec<CategoryBucket> =
        Category::ALL.into_iter().map(CategoryBucket::new).collect();

    for line in body.lines() {
        if line.starts_with("## ") {
            continue;
        }

        let Some(item) = line.trim().strip_prefix('-') else {
            continue;
        };

        let item = item.trim();
        if item.is_empty() {
            continue;
        }

        let category = classify(item);
        // ALL and the bucket list share the same order
        if let Some(bucket) = buckets.iter_mut().find(|b| b.category == category) {
            bucket.items.push(item.to_string());
        }
    }

    buckets
}

fn render_section(bucket: &CategoryBucket) -> String {
    let mut lines = Vec::with_capacity(bucket.items.len() + 1);
    lines.push(format!("*{}*", bucket.category.label()));

    for item in &bucket.items {
        lines.push(format!("{}{}", BULLET, render_item(item)));
    }

    truncate_section(&lines.join("\n"))
}

/// Build the Slack message announcing one changelog entry
pub fn format(entry: &VersionEntry) -> FormattedMessage {
    let sections: Vec<MessageSection> = categorize(&entry.body)
        .iter()
        .filter(|bucket| !bucket.is_empty())
        .map(|bucket| MessageSection {
            category: bucket.category,
            text: render_section(bucket),
        })
        .collect();

    tracing::debug!(
        "Formatted v{} with {} sections",
        entry.version,
        sections.len()
    );

    FormattedMessage {
        version: entry.version.clone(),
        header: format!(":sparkles: Claude Code v{} :sparkles:", entry.version),
        intro: "A new version of Claude Code is out! Here's what changed:".to_string(),
        sections,
        footer: format!("<{}|View the full changelog>", CHANGELOG_PAGE_URL),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changelog::parse;

    #[test]
    fn test_classify_prefixes() {
        assert_eq!(classify("Added: new widget"), Category::Added);
        assert_eq!(classify("add support for X"), Category::Added);
        assert_eq!(classify("New command"), Category::Added);
        assert_eq!(classify("Introducing hooks"), Category::Added);
        assert_eq!(classify("FIXED crash"), Category::Fixed);
        assert_eq!(classify("Fix the thing"), Category::Fixed);
        assert_eq!(classify("Changed default model"), Category::Changed);
        assert_eq!(classify("change how X works"), Category::Changed);
        assert_eq!(classify("Improved startup time"), Category::Improved);
        assert_eq!(classify("Improve errors"), Category::Improved);
        assert_eq!(classify("Removed flag"), Category::Removed);
        assert_eq!(classify("remove old API"), Category::Removed);
    }

    #[test]
    fn test_classify_falls_back_to_updates() {
        assert_eq!(classify("Newline handling is better"), Category::Updates);
        assert_eq!(classify("Addressed an issue"), Category::Updates);
        assert_eq!(classify("Fixes are coming"), Category::Updates);
        assert_eq!(classify("Bumped dependencies"), Category::Updates);
        assert_eq!(classify(""), Category::Updates);
    }

    #[test]
    fn test_classify_uses_leading_word_only() {
        assert_eq!(classify("Fixed: typo that was added"), Category::Fixed);
        assert_eq!(classify("Removed the fix for X"), Category::Removed);
    }

    #[test]
    fn test_render_item_markup() {
        assert_eq!(render_item("**Bold** move"), "*Bold* move");
        assert_eq!(
            render_item("See [docs](https://example.com/docs)"),
            "See <https://example.com/docs|docs>"
        );
        assert_eq!(
            render_item("**New** [link](https://x.io) and `**code**`"),
            "*New* <https://x.io|link> and `*code*`"
        );
        assert_eq!(render_item("Use `--flag` now"), "Use `--flag` now");
        assert_eq!(render_item("a * b"), "a * b");
    }

    #[test]
    fn test_truncate_section() {
        let short = "x".repeat(SECTION_LIMIT);
        assert_eq!(truncate_section(&short), short);

        let long = "y".repeat(SECTION_LIMIT + 1);
        let cut = truncate_section(&long);
        assert!(cut.ends_with(TRUNCATION_MARKER));
        assert_eq!(
            cut.chars().count(),
            SECTION_TRUNCATE_AT + TRUNCATION_MARKER.chars().count()
        );
        assert!(cut.starts_with(&"y".repeat(SECTION_TRUNCATE_AT)));
    }

    #[test]
    fn test_truncate_section_respects_char_boundaries() {
        let long = "é".repeat(SECTION_LIMIT + 10);
        let cut = truncate_section(&long);
        assert!(cut.starts_with(&"é".repeat(SECTION_TRUNCATE_AT)));
        assert!(cut.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_format_sample_entry() {
        let doc = "## 1.2.0\n- Added: new widget\n- Fixed: crash on load\n## 1.1.0\n- Fixed: old bug";
        let entry = &parse(doc)[0];
        let message = format(entry);

        assert_eq!(message.version, "1.2.0");
        assert!(message.header.contains("Claude Code v1.2.0"));
        assert_eq!(message.sections.len(), 2);

        let added = message.section(Category::Added).unwrap();
        assert_eq!(added.text, "*Added*\n  • Added: new widget");

        let fixed = message.section(Category::Fixed).unwrap();
        assert_eq!(fixed.text, "*Fixed*\n  • Fixed: crash on load");

        assert!(message.section(Category::Changed).is_none());
        assert!(message.section(Category::Improved).is_none());
        assert!(message.section(Category::Removed).is_none());
    }

    #[test]
    fn test_sections_follow_category_order() {
        let entry = VersionEntry::new(
            "2.0.0",
            "## 2.0.0\n- Misc tweak\n- Removed X\n- Fixed Y\n- Added Z\n- Fixed W",
        );
        let message = format(&entry);

        let order: Vec<Category> = message.sections.iter().map(|s| s.category).collect();
        assert_eq!(
            order,
            vec![
                Category::Added,
                Category::Fixed,
                Category::Removed,
                Category::Updates
            ]
        );

        let fixed = message.section(Category::Fixed).unwrap();
        assert_eq!(fixed.text, "*Fixed*\n  • Fixed Y\n  • Fixed W");
    }

    #[test]
    fn test_non_bullet_lines_are_ignored() {
        let entry = VersionEntry::new(
            "1.0.0",
            "## 1.0.0\n\nSome prose.\n  - Indented bullet\n* star bullet\n-\n## heading-like",
        );
        let message = format(&entry);

        assert_eq!(message.sections.len(), 1);
        assert_eq!(
            message.sections[0].text,
            "*Updates*\n  • Indented bullet"
        );
    }

    #[test]
    fn test_entry_without_bullets() {
        let entry = VersionEntry::new("0.9.0", "## 0.9.0\n\nJust prose here.");
        let message = format(&entry);

        assert!(message.sections.is_empty());
        assert!(!message.intro.is_empty());
        assert!(message.footer.contains(CHANGELOG_PAGE_URL));
        assert_eq!(message.to_blocks().len(), 5);
    }

    #[test]
    fn test_long_sections_are_truncated() {
        let body: String = std::iter::once("## 3.0.0".to_string())
            .chain((0..200).map(|i| format!("- Fixed issue number {} in the parser", i)))
            .collect::<Vec<_>>()
            .join("\n");
        let message = format(&VersionEntry::new("3.0.0", &body));

        let fixed = message.section(Category::Fixed).unwrap();
        assert!(fixed.text.ends_with(TRUNCATION_MARKER));
        assert!(fixed.text.chars().count() <= SECTION_LIMIT);
    }
}
