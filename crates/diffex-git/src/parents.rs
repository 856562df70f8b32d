// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Parent lookup and commit classification

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GitError;
use crate::provider::DiffProvider;
use crate::refs::CommitRef;
use crate::repo::RepositoryLocation;

/// Shape of a commit, decided by its parent count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// No parents, start of history
    Root,
    /// Exactly one parent
    Ordinary,
    /// Two or more parents
    Merge,
}

/// Ordered parent hashes of one commit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParentSet(Vec<String>);

impl ParentSet {
    /// Wrap an ordered list of parent hashes
    #[must_use]
    pub fn new(parents: Vec<String>) -> Self {
        Self(parents)
    }

    /// Build from `rev-list --parents` tokens, whose first token is the commit itself
    #[must_use]
    pub fn from_rev_list(mut tokens: Vec<String>) -> Self {
        if !tokens.is_empty() {
            tokens.remove(0);
        }
        Self(tokens)
    }

    /// All parents, first parent first
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of parents
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a root commit
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first parent
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// The second parent, the merged-in side of a merge
    #[must_use]
    pub fn second(&self) -> Option<&str> {
        self.0.get(1).map(String::as_str)
    }

    /// Parents beyond the second (octopus merges)
    #[must_use]
    pub fn beyond_second(&self) -> &[String] {
        self.0.get(2..).unwrap_or(&[])
    }

    /// Classification by parent count
    #[must_use]
    pub fn classification(&self) -> Classification {
        match self.0.len() {
            0 => Classification::Root,
            1 => Classification::Ordinary,
            _ => Classification::Merge,
        }
    }
}

/// Looks up a commit's parents through a [`DiffProvider`]
pub struct ParentInspector<'p, P: DiffProvider + ?Sized> {
    provider: &'p P,
}

impl<'p, P: DiffProvider + ?Sized> ParentInspector<'p, P> {
    /// Create an inspector over `provider`
    #[must_use]
    pub fn new(provider: &'p P) -> Self {
        Self { provider }
    }

    /// Fetch and classify the parents of `commit`
    ///
    /// Read-only: the repository is never modified.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommitNotFound` if git cannot resolve `commit`.
    pub fn classify(
        &self,
        repo: &RepositoryLocation,
        commit: &CommitRef,
    ) -> Result<(ParentSet, Classification), GitError> {
        let tokens = self.provider.parents_of(repo, commit)?;
        if tokens.is_empty() {
            return Err(GitError::CommitNotFound {
                reference: commit.to_string(),
            });
        }
        let parents = ParentSet::from_rev_list(tokens);
        let classification = parents.classification();
        debug!(%commit, parents = parents.len(), ?classification, "classified commit");
        Ok((parents, classification))
    }
}
