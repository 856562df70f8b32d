// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! High-level operations over a [`DiffProvider`]
//!
//! Each operation is one unit of work: a commit batch, a branch diff, or a
//! listing. Within a batch every commit stands alone, so one bad commit never
//! stops the others.
//!
//! # Example
//!
//! ```no_run
//! use diffex_git::{DiffSelectionMode, Engine, ListRequest, RepositoryLocation};
//!
//! let repo = RepositoryLocation::open("/path/to/repo").expect("open repo");
//! let request = ListRequest::new(repo, DiffSelectionMode::OnlyPullRequests).with_query("login");
//! for entry in Engine::git().list_log(&request).expect("list") {
//!     println!("{} {}", entry.short_hash(), entry.summary());
//! }
//! ```

use tracing::{info, warn};

use crate::error::GitError;
use crate::executor::{DiffArtifact, DiffExecutor};
use crate::log::{self, LogEntry};
use crate::planner::{DiffPlanner, PlanWarning};
use crate::provider::{DiffProvider, GitCli};
use crate::refs::{CommitRef, RefNormalizer};
use crate::repo::RepositoryLocation;
use crate::request::{BranchDiffRequest, DiffRequest, ListRequest};
use crate::search;

/// A commit that produced no diff, and why
#[derive(Debug)]
pub struct SkippedCommit {
    /// The commit as supplied
    pub commit: CommitRef,
    /// What went wrong
    pub error: GitError,
}

/// Outcome of a commit batch
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Diffs written, in input order
    pub artifacts: Vec<DiffArtifact>,
    /// Non-fatal observations, in input order
    pub warnings: Vec<PlanWarning>,
    /// Commits that produced no diff, in input order
    pub skipped: Vec<SkippedCommit>,
}

impl BatchReport {
    /// True when at least one diff was written
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.artifacts.is_empty()
    }
}

/// Plans and runs diffs, lists log entries
#[derive(Debug, Clone)]
pub struct Engine<P: DiffProvider> {
    provider: P,
    normalizer: RefNormalizer,
}

impl Engine<GitCli> {
    /// Engine backed by `git` from `PATH`
    #[must_use]
    pub fn git() -> Self {
        Self::new(GitCli::new())
    }
}

impl<P: DiffProvider> Engine<P> {
    /// Engine over any provider, normalizing refs against `origin`
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            normalizer: RefNormalizer::default(),
        }
    }

    /// Normalize refs against `remote` and fetch from it
    #[must_use]
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.normalizer = RefNormalizer::new(remote);
        self
    }

    /// The underlying provider
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The remote used for normalization and fetching
    #[must_use]
    pub fn remote(&self) -> &str {
        self.normalizer.remote()
    }

    fn planner(&self) -> DiffPlanner<'_, P> {
        DiffPlanner::new(&self.provider).with_normalizer(self.normalizer.clone())
    }

    /// Plan and write a diff for every commit in the request, in order
    ///
    /// Never fails as a whole: per-commit errors land in
    /// [`BatchReport::skipped`].
    pub fn run_commit_batch(&self, request: &DiffRequest) -> BatchReport {
        let planner = self.planner();
        let executor = DiffExecutor::new(&self.provider);
        let mut report = BatchReport::default();

        for commit in request.commits() {
            let planned = match planner.plan_commit_diff(request.repo(), commit, request.mode())
            {
                Ok(planned) => planned,
                Err(error) => {
                    warn!(%commit, %error, "skipping commit");
                    report.skipped.push(SkippedCommit {
                        commit: commit.clone(),
                        error,
                    });
                    continue;
                }
            };

            if let Some(warning) = planned.warning {
                warn!(%commit, %warning, "diffing with warning");
                report.warnings.push(warning);
            }

            match executor.execute(request.repo(), &planned.plan, request.output_dir()) {
                Ok(artifact) => report.artifacts.push(artifact),
                Err(error) => {
                    warn!(%commit, %error, "diff not written");
                    report.skipped.push(SkippedCommit {
                        commit: commit.clone(),
                        error,
                    });
                }
            }
        }

        info!(
            written = report.artifacts.len(),
            skipped = report.skipped.len(),
            warnings = report.warnings.len(),
            "commit batch finished"
        );
        report
    }

    /// Diff a branch against its merge base with the base branch
    ///
    /// # Errors
    ///
    /// Returns the first failure among fetch, planning and execution.
    pub fn run_branch_diff(&self, request: &BranchDiffRequest) -> Result<DiffArtifact, GitError> {
        if request.fetch() {
            self.provider.fetch(request.repo(), self.remote())?;
        }
        let plan = self
            .planner()
            .plan_branch_diff(request.repo(), request.base(), request.target())?;
        DiffExecutor::new(&self.provider).execute(request.repo(), &plan, request.output_dir())
    }

    /// Log entries selected by the request's mode and query
    ///
    /// # Errors
    ///
    /// Returns `GitError` if `git log` fails.
    pub fn list_log(&self, request: &ListRequest) -> Result<Vec<LogEntry>, GitError> {
        let raw = self
            .provider
            .log(request.repo(), &request.mode().log_filter())?;
        let entries = log::parse(&raw);
        Ok(search::filter(&entries, request.query()))
    }

    /// Remote-tracking branch names containing `query`
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the fetch or the listing fails.
    pub fn list_remote_branches(
        &self,
        repo: &RepositoryLocation,
        query: &str,
        fetch: bool,
    ) -> Result<Vec<String>, GitError> {
        if fetch {
            self.provider.fetch(repo, self.remote())?;
        }
        let branches = self.provider.list_remote_branches(repo)?;
        Ok(search::filter_names(&branches, query))
    }
}
