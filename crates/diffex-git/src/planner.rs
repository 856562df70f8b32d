// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Diff planning
//!
//! A [`DiffPlan`] names the two endpoints handed to `git diff` and the file
//! the result goes to. Plans are recomputed for every request.
//!
//! For a merge commit the plan diffs the first parent against the second.
//! That shows what the two sides of the merge disagreed on, which is not the
//! same as what the merge changed on the branch it landed on.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GitError;
use crate::parents::{Classification, ParentInspector, ParentSet};
use crate::provider::DiffProvider;
use crate::refs::{CommitRef, RefNormalizer};
use crate::repo::RepositoryLocation;
use crate::request::DiffSelectionMode;

/// How the endpoints of a plan were chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanMode {
    /// Merge base of two refs against the target ref
    BranchDivergence,
    /// First parent against second parent of a merge
    MergeParents,
    /// Only parent against the commit, used when the commit is not a merge
    SingleParentFallback,
}

/// Endpoints and output file name for one diff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffPlan {
    /// How the endpoints were chosen
    pub mode: PlanMode,
    /// Old side of the diff
    pub left: CommitRef,
    /// New side of the diff
    pub right: CommitRef,
    /// File name, relative to the output directory
    pub output_file_name: String,
}

/// Something the caller should tell the user about, without failing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanWarning {
    /// The commit has a single parent and was diffed against it
    NotAMerge {
        /// The commit as supplied
        commit: String,
    },
    /// Parents beyond the second took no part in the diff
    OctopusMerge {
        /// The commit as supplied
        commit: String,
        /// Parents that were left out
        ignored: Vec<String>,
    },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAMerge { commit } => write!(
                f,
                "{commit} is not a merge commit; diffed against its only parent"
            ),
            Self::OctopusMerge { commit, ignored } => write!(
                f,
                "{commit} has {} parents; only the first two were diffed (ignored: {})",
                ignored.len() + 2,
                ignored.join(", ")
            ),
        }
    }
}

/// A commit's plan together with what was learned while planning it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCommit {
    /// The commit as supplied
    pub commit: CommitRef,
    /// Its parents
    pub parents: ParentSet,
    /// Its classification
    pub classification: Classification,
    /// The diff to run
    pub plan: DiffPlan,
    /// Non-fatal observation, if any
    pub warning: Option<PlanWarning>,
}

/// Output file name for a commit diff: `{commit}_diff.txt`
#[must_use]
pub fn commit_diff_file_name(commit: &CommitRef) -> String {
    format!("{}_diff.txt", commit.file_stem())
}

/// Output file name for a branch diff: `all_commits_on_{ref}.diff`
#[must_use]
pub fn branch_diff_file_name(target: &CommitRef) -> String {
    format!("all_commits_on_{}.diff", target.file_stem())
}

/// Turns commits and branch pairs into [`DiffPlan`]s
pub struct DiffPlanner<'p, P: DiffProvider + ?Sized> {
    provider: &'p P,
    normalizer: RefNormalizer,
}

impl<'p, P: DiffProvider + ?Sized> DiffPlanner<'p, P> {
    /// Create a planner that qualifies refs with `origin`
    #[must_use]
    pub fn new(provider: &'p P) -> Self {
        Self {
            provider,
            normalizer: RefNormalizer::default(),
        }
    }

    /// Use a different normalizer
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: RefNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Plan the diff of everything `target` added since it left `base`
    ///
    /// Both refs are remote-qualified first. The plan diffs their merge base
    /// against the qualified target.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NoCommonAncestor` when the histories are unrelated,
    /// or `GitError::CommitNotFound` when a ref does not resolve.
    pub fn plan_branch_diff(
        &self,
        repo: &RepositoryLocation,
        base: &CommitRef,
        target: &CommitRef,
    ) -> Result<DiffPlan, GitError> {
        let base = self.normalizer.normalize(base);
        let target = self.normalizer.normalize(target);

        let merge_base = self
            .provider
            .merge_base(repo, &base, &target)?
            .ok_or_else(|| GitError::NoCommonAncestor {
                base: base.to_string(),
                target: target.to_string(),
            })?;
        debug!(%base, %target, %merge_base, "found merge base");

        Ok(DiffPlan {
            mode: PlanMode::BranchDivergence,
            output_file_name: branch_diff_file_name(&target),
            left: merge_base,
            right: target,
        })
    }

    /// Plan the diff for a single commit
    ///
    /// `mode` only records how the commit was offered to the user; endpoint
    /// selection depends on the parent count alone.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NoParentCommit` for a root commit, or
    /// `GitError::CommitNotFound` when the commit does not resolve.
    pub fn plan_commit_diff(
        &self,
        repo: &RepositoryLocation,
        commit: &CommitRef,
        mode: DiffSelectionMode,
    ) -> Result<PlannedCommit, GitError> {
        let (parents, classification) = ParentInspector::new(self.provider).classify(repo, commit)?;
        debug!(%commit, ?mode, ?classification, "planning commit diff");

        let (plan_mode, left, right, warning) = match (parents.first(), parents.second()) {
            (None, _) => {
                return Err(GitError::NoParentCommit {
                    commit: commit.to_string(),
                });
            }
            (Some(parent), None) => (
                PlanMode::SingleParentFallback,
                CommitRef::from_git(parent),
                commit.clone(),
                Some(PlanWarning::NotAMerge {
                    commit: commit.to_string(),
                }),
            ),
            (Some(first), Some(second)) => {
                let ignored = parents.beyond_second();
                let warning = (!ignored.is_empty()).then(|| PlanWarning::OctopusMerge {
                    commit: commit.to_string(),
                    ignored: ignored.to_vec(),
                });
                (
                    PlanMode::MergeParents,
                    CommitRef::from_git(first),
                    CommitRef::from_git(second),
                    warning,
                )
            }
        };

        let plan = DiffPlan {
            mode: plan_mode,
            left,
            right,
            output_file_name: commit_diff_file_name(commit),
        };

        Ok(PlannedCommit {
            commit: commit.clone(),
            parents,
            classification,
            plan,
            warning,
        })
    }
}
