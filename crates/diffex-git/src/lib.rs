// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! diffex-git: commit classification and diff planning for diffex
//!
//! This library crate decides *what* diff to compute for a commit, a merge or
//! a branch, runs it through the `git` command line, and parses `git log`
//! output into searchable records.
//!
//! # Example
//!
//! ```no_run
//! use diffex_git::{DiffRequest, DiffSelectionMode, Engine, RepositoryLocation};
//! use diffex_git::request::parse_commit_list;
//!
//! let repo = RepositoryLocation::open("/path/to/repo").expect("open repo");
//! let commits = parse_commit_list("abc1234, def5678").expect("commit list");
//! let request = DiffRequest::new(repo, commits, DiffSelectionMode::OnlyMerges, "/tmp/diffs")
//!     .expect("valid request");
//!
//! let report = Engine::git().run_commit_batch(&request);
//! for artifact in &report.artifacts {
//!     println!("wrote {}", artifact.path.display());
//! }
//! ```

#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod executor;
pub mod log;
pub mod parents;
pub mod planner;
pub mod provider;
pub mod refs;
pub mod repo;
pub mod request;
pub mod search;

#[cfg(test)]
mod testing;

pub use engine::{BatchReport, Engine, SkippedCommit};
pub use error::GitError;
pub use executor::{DiffArtifact, DiffExecutor};
pub use log::LogEntry;
pub use parents::{Classification, ParentInspector, ParentSet};
pub use planner::{DiffPlan, DiffPlanner, PlanMode, PlanWarning, PlannedCommit};
pub use provider::{CommandOutcome, DiffProvider, GitCli, LogFilter};
pub use refs::{CommitRef, RefNormalizer};
pub use repo::RepositoryLocation;
pub use request::{BranchDiffRequest, DiffRequest, DiffSelectionMode, ListRequest};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::engine::{BatchReport, Engine};
    pub use crate::error::GitError;
    pub use crate::log::LogEntry;
    pub use crate::planner::{DiffPlan, PlanMode};
    pub use crate::provider::{DiffProvider, GitCli};
    pub use crate::refs::CommitRef;
    pub use crate::repo::RepositoryLocation;
    pub use crate::request::{BranchDiffRequest, DiffRequest, DiffSelectionMode, ListRequest};
}
