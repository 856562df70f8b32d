// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Immutable request values handed to the [`Engine`](crate::Engine)
//!
//! Requests are validated when built, so a request that exists never reaches
//! git with a blank field.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GitError;
use crate::provider::{LogFilter, PULL_REQUEST_PATTERN};
use crate::refs::CommitRef;
use crate::repo::RepositoryLocation;

/// Which commits are offered to the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffSelectionMode {
    /// Every commit
    #[default]
    AllDiffs,
    /// Merge commits only
    OnlyMerges,
    /// Merge commits of pull requests only
    OnlyPullRequests,
}

impl DiffSelectionMode {
    /// The `git log` filter that lists candidates for this mode
    #[must_use]
    pub fn log_filter(self) -> LogFilter {
        match self {
            Self::AllDiffs => LogFilter::None,
            Self::OnlyMerges => LogFilter::MergesOnly,
            Self::OnlyPullRequests => {
                LogFilter::MergesWithMessageGrep(PULL_REQUEST_PATTERN.to_string())
            }
        }
    }

    /// Short name, as accepted by [`FromStr`]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllDiffs => "all",
            Self::OnlyMerges => "merges",
            Self::OnlyPullRequests => "prs",
        }
    }
}

impl FromStr for DiffSelectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "all_diffs" => Ok(Self::AllDiffs),
            "merges" | "only_merges" => Ok(Self::OnlyMerges),
            "prs" | "pull_requests" | "only_pull_requests" => Ok(Self::OnlyPullRequests),
            other => Err(format!("unknown selection mode: {other}")),
        }
    }
}

/// Split a comma- or whitespace-separated list of commit hashes
///
/// # Errors
///
/// Returns `GitError::Validation` if the list holds no hashes.
pub fn parse_commit_list(input: &str) -> Result<Vec<CommitRef>, GitError> {
    let commits = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(CommitRef::new)
        .collect::<Result<Vec<_>, _>>()?;
    if commits.is_empty() {
        return Err(GitError::Validation {
            field: "commit hashes",
        });
    }
    Ok(commits)
}

fn require_dir(path: PathBuf) -> Result<PathBuf, GitError> {
    if path.as_os_str().is_empty() {
        return Err(GitError::Validation {
            field: "output directory",
        });
    }
    Ok(path)
}

/// Diff a batch of commits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRequest {
    repo: RepositoryLocation,
    commits: Vec<CommitRef>,
    mode: DiffSelectionMode,
    output_dir: PathBuf,
}

impl DiffRequest {
    /// Build a batch request
    ///
    /// # Errors
    ///
    /// Returns `GitError::Validation` if `commits` or `output_dir` is empty.
    pub fn new(
        repo: RepositoryLocation,
        commits: Vec<CommitRef>,
        mode: DiffSelectionMode,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self, GitError> {
        if commits.is_empty() {
            return Err(GitError::Validation {
                field: "commit hashes",
            });
        }
        Ok(Self {
            repo,
            commits,
            mode,
            output_dir: require_dir(output_dir.into())?,
        })
    }

    /// Repository to diff in
    #[must_use]
    pub fn repo(&self) -> &RepositoryLocation {
        &self.repo
    }

    /// Commits, in processing order
    #[must_use]
    pub fn commits(&self) -> &[CommitRef] {
        &self.commits
    }

    /// How the commits were selected
    #[must_use]
    pub fn mode(&self) -> DiffSelectionMode {
        self.mode
    }

    /// Directory the diff files go to
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// Diff a branch against the point where it left a base branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchDiffRequest {
    repo: RepositoryLocation,
    base: CommitRef,
    target: CommitRef,
    output_dir: PathBuf,
    fetch: bool,
}

impl BranchDiffRequest {
    /// Build a branch request; remote refs are fetched first by default
    ///
    /// # Errors
    ///
    /// Returns `GitError::Validation` if `output_dir` is empty.
    pub fn new(
        repo: RepositoryLocation,
        base: CommitRef,
        target: CommitRef,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self, GitError> {
        Ok(Self {
            repo,
            base,
            target,
            output_dir: require_dir(output_dir.into())?,
            fetch: true,
        })
    }

    /// Skip or force the fetch before planning
    #[must_use]
    pub fn with_fetch(mut self, fetch: bool) -> Self {
        self.fetch = fetch;
        self
    }

    /// Repository to diff in
    #[must_use]
    pub fn repo(&self) -> &RepositoryLocation {
        &self.repo
    }

    /// Base branch, as typed
    #[must_use]
    pub fn base(&self) -> &CommitRef {
        &self.base
    }

    /// Branch being diffed, as typed
    #[must_use]
    pub fn target(&self) -> &CommitRef {
        &self.target
    }

    /// Directory the diff file goes to
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Whether to fetch before planning
    #[must_use]
    pub fn fetch(&self) -> bool {
        self.fetch
    }
}

/// List log entries, optionally narrowed by a search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    repo: RepositoryLocation,
    mode: DiffSelectionMode,
    query: String,
}

impl ListRequest {
    /// List everything the mode selects
    #[must_use]
    pub fn new(repo: RepositoryLocation, mode: DiffSelectionMode) -> Self {
        Self {
            repo,
            mode,
            query: String::new(),
        }
    }

    /// Keep only entries matching `query`
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Repository to list
    #[must_use]
    pub fn repo(&self) -> &RepositoryLocation {
        &self.repo
    }

    /// Which commits to list
    #[must_use]
    pub fn mode(&self) -> DiffSelectionMode {
        self.mode
    }

    /// Search query, empty for none
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }
}
