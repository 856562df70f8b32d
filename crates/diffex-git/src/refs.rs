// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit references and remote qualification
//!
//! Users type bare branch names (`release/2024c`); git wants the
//! remote-tracking form (`origin/release/2024c`). [`RefNormalizer`] does that
//! rewrite as pure text, without asking git whether the result resolves.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GitError;

/// Remote used when none is configured
pub const DEFAULT_REMOTE: &str = "origin";

/// A commit hash or branch name, as typed or after normalization
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitRef(String);

impl CommitRef {
    /// Create a reference from user input
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Validation` if the input is blank, or starts with
    /// `-` and would be read by git as an option.
    pub fn new(reference: impl AsRef<str>) -> Result<Self, GitError> {
        let trimmed = reference.as_ref().trim();
        if trimmed.is_empty() || trimmed.starts_with('-') {
            return Err(GitError::Validation {
                field: "commit reference",
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Wrap a value reported by git itself
    pub(crate) fn from_git(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// The reference text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The reference with path separators replaced, usable in a file name
    #[must_use]
    pub fn file_stem(&self) -> String {
        self.0.replace(['/', '\\'], "_")
    }
}

impl fmt::Display for CommitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CommitRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Qualifies bare branch names with a remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefNormalizer {
    remote: String,
    known_remotes: Vec<String>,
}

impl Default for RefNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_REMOTE)
    }
}

impl RefNormalizer {
    /// Normalize against `remote`, which is also the only known remote
    #[must_use]
    pub fn new(remote: impl Into<String>) -> Self {
        let remote = remote.into();
        Self {
            known_remotes: vec![remote.clone()],
            remote,
        }
    }

    /// Also treat refs under these remotes as already qualified
    #[must_use]
    pub fn with_known_remotes<I, S>(mut self, remotes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for remote in remotes {
            let remote = remote.into();
            if !self.known_remotes.contains(&remote) {
                self.known_remotes.push(remote);
            }
        }
        self
    }

    /// The remote prepended to bare names
    #[must_use]
    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Whether `reference` already starts with `<known remote>/`
    #[must_use]
    pub fn is_qualified(&self, reference: &str) -> bool {
        reference
            .split_once('/')
            .is_some_and(|(head, rest)| {
                !rest.is_empty() && self.known_remotes.iter().any(|r| r == head)
            })
    }

    /// Return `reference` qualified with the remote
    ///
    /// Already-qualified refs come back unchanged, so normalizing twice is a
    /// no-op. A local branch such as `feat/x` is not a remote ref and gets the
    /// prefix like any other bare name.
    #[must_use]
    pub fn normalize(&self, reference: &CommitRef) -> CommitRef {
        if self.is_qualified(reference.as_str()) {
            reference.clone()
        } else {
            CommitRef(format!("{}/{}", self.remote, reference.as_str()))
        }
    }
}

/// Normalize against the default `origin` remote
#[must_use]
pub fn normalize(reference: &CommitRef) -> CommitRef {
    RefNormalizer::default().normalize(reference)
}
