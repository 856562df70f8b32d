// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Case-insensitive substring filtering
//!
//! Cheap and pure, so callers can re-run it on every keystroke.

use crate::log::LogEntry;

/// Entries whose `"{hash} {message}"` contains `query`, ignoring case
///
/// Order is preserved. An empty query keeps everything.
#[must_use]
pub fn filter(entries: &[LogEntry], query: &str) -> Vec<LogEntry> {
    if query.is_empty() {
        return entries.to_vec();
    }
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            format!("{} {}", entry.commit_hash, entry.message)
                .to_lowercase()
                .contains(&needle)
        })
        .cloned()
        .collect()
}

/// Names containing `query`, ignoring case
///
/// Same rules as [`filter`], for plain strings such as branch names.
#[must_use]
pub fn filter_names<S: AsRef<str>>(names: &[S], query: &str) -> Vec<String> {
    let needle = query.to_lowercase();
    names
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn entries() -> Vec<LogEntry> {
        vec![
            LogEntry::new("abc1234", "Merge pull request #1 from team/Login"),
            LogEntry::new("def5678", "Fix typo in README"),
            LogEntry::new("0a1b2c3", "Merge pull request #2 from team/logout"),
        ]
    }

    #[test]
    fn test_empty_query_returns_everything() {
        assert_eq!(filter(&entries(), ""), entries());
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let hits = filter(&entries(), "LOGIN");
        assert_eq!(hits, vec![entries()[0].clone()]);
    }

    #[test]
    fn test_query_preserves_order() {
        let hits = filter(&entries(), "merge pull");
        assert_eq!(hits, vec![entries()[0].clone(), entries()[2].clone()]);
    }

    #[test]
    fn test_query_matches_hash() {
        let hits = filter(&entries(), "DEF56");
        assert_eq!(hits, vec![entries()[1].clone()]);
    }

    #[test]
    fn test_no_match() {
        assert!(filter(&entries(), "nothing like this").is_empty());
    }

    #[test]
    fn test_filter_names() {
        let names = ["origin/main", "origin/release/2024c", "origin/Feature/X"];
        assert_eq!(filter_names(&names, "feature"), vec!["origin/Feature/X"]);
        assert_eq!(filter_names(&names, "").len(), 3);
    }
}
