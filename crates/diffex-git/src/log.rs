// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Git log text parsing
//!
//! `git log` prints records back to back, each introduced by a
//! `commit <hash>` line. [`parse`] cuts the text at those boundaries and pulls
//! a hash and message out of every record.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Boundary between consecutive records in default `git log` output
pub const RECORD_SEPARATOR: &str = "\ncommit ";

/// Lowercase hex, 7 to 40 characters, on word boundaries
static COMMIT_HASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9a-f]{7,40}\b").expect("valid commit hash regex"));

/// One commit record from a log listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Abbreviated or full commit hash
    pub commit_hash: String,
    /// Everything after the hash, trimmed
    pub message: String,
}

impl LogEntry {
    /// Create an entry
    #[must_use]
    pub fn new(commit_hash: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            commit_hash: commit_hash.into(),
            message: message.into(),
        }
    }

    /// Whether `value` has the shape of a commit hash
    #[must_use]
    pub fn is_valid_hash(value: &str) -> bool {
        (7..=40).contains(&value.len())
            && value
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }

    /// The first 7 characters of the hash
    #[must_use]
    pub fn short_hash(&self) -> &str {
        &self.commit_hash[..7.min(self.commit_hash.len())]
    }

    /// The headline of the commit message
    ///
    /// Default `git log` output indents message lines by four spaces after
    /// the `Author:`/`Date:` headers; the first such line is the headline.
    /// Otherwise this is the first non-empty line.
    #[must_use]
    pub fn summary(&self) -> &str {
        self.message
            .lines()
            .find(|line| line.starts_with("    ") && !line.trim().is_empty())
            .or_else(|| self.message.lines().find(|line| !line.trim().is_empty()))
            .map(str::trim)
            .unwrap_or("")
    }
}

/// Parse raw `git log` text into entries, in input order
///
/// Segments without a recognizable hash are dropped.
#[must_use]
pub fn parse(raw: &str) -> Vec<LogEntry> {
    raw.split(RECORD_SEPARATOR)
        .filter(|segment| !segment.trim().is_empty())
        .filter_map(|segment| {
            let entry = extract_entry(segment);
            if entry.is_none() {
                trace!(segment, "dropping log segment without a commit hash");
            }
            entry
        })
        .collect()
}

/// Extract the first hash found anywhere in `segment` and the text after it
///
/// The hash is searched for rather than anchored at the segment start: the
/// first record still carries its `commit ` label.
#[must_use]
pub fn extract_entry(segment: &str) -> Option<LogEntry> {
    let found = COMMIT_HASH.find(segment)?;
    Some(LogEntry::new(
        found.as_str(),
        segment[found.end()..].trim(),
    ))
}
