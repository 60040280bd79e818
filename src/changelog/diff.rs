//! Detection of version entries that are new since the cached snapshot

use super::{parse, VersionEntry};
use std::collections::HashSet;

/// Collect the set of versions present in a document
pub fn versions(document: &str) -> HashSet<String> {
    parse(document).into_iter().map(|e| e.version).collect()
}

/// Find entries in `current` that were not present in `cached`.
///
/// Without a cached snapshot only the newest entry is returned, so a first
/// run does not replay the whole history. The result keeps the current
/// document's order (newest first).
pub fn find_new(current: &str, cached: Option<&str>) -> Vec<VersionEntry> {
    let entries = parse(current);

    let Some(cached) = cached else {
        tracing::debug!("No cached snapshot, taking the newest entry only");
        return entries.into_iter().take(1).collect();
    };

    let seen = versions(cached);

    let novel: Vec<VersionEntry> = entries
        .into_iter()
        .filter(|e| !seen.contains(&e.version))
        .collect();

    tracing::debug!(
        "{} cached versions, {} new versions",
        seen.len(),
        novel.len()
    );

    novel
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "## 1.2.0\n- Added: new widget\n- Fixed: crash on load\n## 1.1.0\n- Fixed: old bug";

    fn versions_of(entries: &[VersionEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.version.as_str()).collect()
    }

    #[test]
    fn test_first_run_takes_newest_only() {
        let novel = find_new(DOC, None);
        assert_eq!(novel.len(), 1);
        assert_eq!(novel[0], parse(DOC)[0]);
    }

    #[test]
    fn test_first_run_on_empty_document() {
        assert!(find_new("# Changelog\n", None).is_empty());
    }

    #[test]
    fn test_identical_documents_have_nothing_new() {
        assert!(find_new(DOC, Some(DOC)).is_empty());
    }

    #[test]
    fn test_only_unseen_versions_are_returned() {
        let cached = "## 1.1.0\n- Fixed: old bug";
        let novel = find_new(DOC, Some(cached));
        assert_eq!(versions_of(&novel), vec!["1.2.0"]);
    }

    #[test]
    fn test_several_new_versions_keep_document_order() {
        let current = "## 1.4.0\n- d\n## 1.3.0\n- c\n## 1.2.0\n- b\n## 1.1.0\n- a";
        let cached = "## 1.2.0\n- b\n## 1.1.0\n- a";

        let novel = find_new(current, Some(cached));
        assert_eq!(versions_of(&novel), vec!["1.4.0", "1.3.0"]);

        let seen = versions(cached);
        assert!(novel.iter().all(|e| !seen.contains(&e.version)));
    }

    #[test]
    fn test_empty_cache_treats_everything_as_new() {
        let novel = find_new(DOC, Some(""));
        assert_eq!(versions_of(&novel), vec!["1.2.0", "1.1.0"]);
    }

    #[test]
    fn test_edited_body_is_not_new() {
        let cached = "## 1.2.0\n- Added: old wording\n## 1.1.0\n- Fixed: old bug";
        assert!(find_new(DOC, Some(cached)).is_empty());
    }

    #[test]
    fn test_duplicate_headings_are_tolerated() {
        let current = "## 2.0.0\n- x\n## 2.0.0\n- y\n## 1.0.0\n- z";
        let cached = "## 1.0.0\n- z";

        let novel = find_new(current, Some(cached));
        assert_eq!(versions_of(&novel), vec!["2.0.0", "2.0.0"]);
    }
}
