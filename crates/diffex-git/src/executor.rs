// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Running planned diffs into files

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::GitError;
use crate::planner::DiffPlan;
use crate::provider::DiffProvider;
use crate::repo::RepositoryLocation;

/// A diff file on disk and the plan that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffArtifact {
    /// Where the diff was written
    pub path: PathBuf,
    /// The plan that was executed
    pub plan: DiffPlan,
}

/// Executes [`DiffPlan`]s through a [`DiffProvider`]
pub struct DiffExecutor<'p, P: DiffProvider + ?Sized> {
    provider: &'p P,
}

impl<'p, P: DiffProvider + ?Sized> DiffExecutor<'p, P> {
    /// Create an executor over `provider`
    #[must_use]
    pub fn new(provider: &'p P) -> Self {
        Self { provider }
    }

    /// Write the diff for `plan` to `output_dir/plan.output_file_name`
    ///
    /// An existing file is overwritten. `output_dir` is never created. Once
    /// git has started the file exists, even if git then fails.
    ///
    /// # Errors
    ///
    /// - `GitError::Validation` if `output_dir` is empty
    /// - `GitError::OutputDirectoryMissing` if `output_dir` is not a directory
    /// - `GitError::PermissionDenied` if the file cannot be created
    /// - `GitError::CommandFailed` if git exits non-zero
    pub fn execute(
        &self,
        repo: &RepositoryLocation,
        plan: &DiffPlan,
        output_dir: &Path,
    ) -> Result<DiffArtifact, GitError> {
        if output_dir.as_os_str().is_empty() {
            return Err(GitError::Validation {
                field: "output directory",
            });
        }
        if !output_dir.is_dir() {
            return Err(GitError::OutputDirectoryMissing {
                path: output_dir.display().to_string(),
            });
        }

        let path = output_dir.join(&plan.output_file_name);
        let file = File::create(&path).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => GitError::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => GitError::Io(e),
        })?;

        let outcome = self
            .provider
            .diff_into(repo, &plan.left, &plan.right, file)?;
        if !outcome.success() {
            warn!(
                path = %path.display(),
                status = ?outcome.status,
                "git diff failed; output file may be incomplete"
            );
            return Err(GitError::CommandFailed {
                command: format!("git diff {} {}", plan.left, plan.right),
                status: outcome.status,
                stderr: outcome.stderr,
            });
        }

        info!(path = %path.display(), mode = ?plan.mode, "wrote diff");
        Ok(DiffArtifact {
            path,
            plan: plan.clone(),
        })
    }
}
