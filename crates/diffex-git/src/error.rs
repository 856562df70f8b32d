// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for diffex-git

use thiserror::Error;

/// Errors that can occur while planning or executing diffs
#[derive(Debug, Error)]
pub enum GitError {
    /// Error from git2 library
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),

    /// Unclassified I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A required input was missing or blank
    #[error("Missing required input: {field}")]
    Validation {
        /// Human readable name of the missing input
        field: &'static str,
    },

    /// Repository not found at the specified path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// A commit or branch reference could not be resolved
    #[error("Commit not found: {reference}")]
    CommitNotFound {
        /// The reference string that could not be resolved
        reference: String,
    },

    /// The two refs share no history
    #[error("Unable to find common ancestor between {base} and {target}")]
    NoCommonAncestor {
        /// Normalized base ref
        base: String,
        /// Normalized target ref
        target: String,
    },

    /// Root commit, nothing to diff against
    #[error("Commit {commit} has no parent to diff against")]
    NoParentCommit {
        /// The root commit as supplied
        commit: String,
    },

    /// The output directory does not exist
    #[error("Output directory does not exist: {path}")]
    OutputDirectoryMissing {
        /// The missing directory
        path: String,
    },

    /// A file could not be written
    #[error("Permission denied: {path}")]
    PermissionDenied {
        /// The path that could not be written
        path: String,
    },

    /// `git` ran but reported failure
    #[error("`{command}` failed ({}): {stderr}", describe_status(.status))]
    CommandFailed {
        /// The command line that was run
        command: String,
        /// Exit code, `None` when terminated by a signal
        status: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// `git` could not be started at all
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        /// The command line that was attempted
        command: String,
        /// Underlying launch error
        #[source]
        source: std::io::Error,
    },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}
