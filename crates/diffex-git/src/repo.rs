// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Validated repository locations
//!
//! Every git invocation runs with a [`RepositoryLocation`] as its explicit
//! working directory. The process-wide current directory is never changed.

use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository};

use crate::error::GitError;

/// Absolute path to the root of a non-bare working copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocation {
    root: PathBuf,
}

impl RepositoryLocation {
    /// Open the working copy rooted at `path`
    ///
    /// # Errors
    ///
    /// Returns `GitError::Validation` for an empty path,
    /// `GitError::RepositoryNotFound` if the path is not the root of a
    /// working copy (bare repositories included), and `GitError::Git2` if a
    /// repository exists but cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(GitError::Validation {
                field: "repository path",
            });
        }
        let repo = Repository::open(path).map_err(|e| open_error(path, e))?;
        Self::from_repository(&repo, path)
    }

    /// Discover the working copy containing `path`
    ///
    /// This walks up the directory tree to find a `.git` directory.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if no working copy is found and
    /// `GitError::Git2` if the one found cannot be read.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|e| open_error(path, e))?;
        Self::from_repository(&repo, path)
    }

    fn from_repository(repo: &Repository, requested: &Path) -> Result<Self, GitError> {
        let workdir = repo.workdir().ok_or_else(|| GitError::RepositoryNotFound {
            path: requested.display().to_string(),
        })?;
        let root = workdir.canonicalize()?;
        Ok(Self { root })
    }

    /// The working copy root
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }
}

/// Missing repositories are `RepositoryNotFound`; anything else keeps the git2 error
fn open_error(path: &Path, error: git2::Error) -> GitError {
    if error.code() == ErrorCode::NotFound || !path.exists() {
        GitError::RepositoryNotFound {
            path: path.display().to_string(),
        }
    } else {
        GitError::Git2(error)
    }
}
