// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The git operations diffex relies on
//!
//! [`DiffProvider`] is the seam between decision logic and the version-control
//! tool. [`GitCli`] implements it by spawning `git` with the repository as the
//! child's working directory.

use std::ffi::OsString;
use std::fs::File;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use tracing::debug;

use crate::error::GitError;
use crate::refs::CommitRef;
use crate::repo::RepositoryLocation;

/// Commit message pattern that marks pull-request merges
pub const PULL_REQUEST_PATTERN: &str = "pull request";

/// Options pinning `git log` to the medium format regardless of user config
const LOG_FORMAT_ARGS: [&str; 5] = [
    "--no-color",
    "--pretty=medium",
    "--no-decorate",
    "--no-abbrev-commit",
    "--no-show-signature",
];

/// Which commits `git log` should list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogFilter {
    /// Every commit reachable from HEAD
    #[default]
    None,
    /// Merge commits only
    MergesOnly,
    /// Merge commits whose message matches the pattern
    MergesWithMessageGrep(String),
}

impl LogFilter {
    /// The `git log` arguments for this filter
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["log".to_string()];
        args.extend(LOG_FORMAT_ARGS.iter().map(|a| (*a).to_string()));
        match self {
            Self::None => {}
            Self::MergesOnly => args.push("--merges".to_string()),
            Self::MergesWithMessageGrep(pattern) => {
                args.push("--merges".to_string());
                args.push(format!("--grep={pattern}"));
            }
        }
        args
    }
}

/// Exit status and error stream of a finished git process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Exit code, `None` when terminated by a signal
    pub status: Option<i32>,
    /// Captured standard error, lossily decoded
    pub stderr: String,
}

impl CommandOutcome {
    /// Outcome of a process that exited cleanly
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: Some(0),
            stderr: String::new(),
        }
    }

    /// Whether the process exited with status 0
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Version-control operations, each scoped to an explicit repository
pub trait DiffProvider {
    /// Refresh remote-tracking refs from `remote`
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the fetch cannot run or fails.
    fn fetch(&self, repo: &RepositoryLocation, remote: &str) -> Result<(), GitError>;

    /// Names of all remote-tracking branches
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the listing cannot run or fails.
    fn list_remote_branches(&self, repo: &RepositoryLocation) -> Result<Vec<String>, GitError>;

    /// Lowest common ancestor of two refs, `None` for unrelated histories
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommitNotFound` if either ref does not resolve.
    fn merge_base(
        &self,
        repo: &RepositoryLocation,
        a: &CommitRef,
        b: &CommitRef,
    ) -> Result<Option<CommitRef>, GitError>;

    /// The commit followed by its parents, in `rev-list --parents` order
    ///
    /// The first element is the commit itself.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommitNotFound` if the ref does not resolve.
    fn parents_of(
        &self,
        repo: &RepositoryLocation,
        commit: &CommitRef,
    ) -> Result<Vec<String>, GitError>;

    /// Raw `git log` text
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the log cannot run or fails.
    fn log(&self, repo: &RepositoryLocation, filter: &LogFilter) -> Result<String, GitError>;

    /// Write the diff between two refs verbatim into `sink`
    ///
    /// A non-zero exit is reported in the outcome, not as an error.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Spawn` if git cannot be started.
    fn diff_into(
        &self,
        repo: &RepositoryLocation,
        left: &CommitRef,
        right: &CommitRef,
        sink: File,
    ) -> Result<CommandOutcome, GitError>;
}

/// [`DiffProvider`] backed by the `git` executable
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCli {
    /// Use `git` from `PATH`
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("git"),
        }
    }

    /// Use a specific git executable
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command<S: AsRef<str>>(&self, repo: &RepositoryLocation, args: &[S]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(repo.path())
            .args(args.iter().map(|a| OsString::from(a.as_ref())))
            .stdin(Stdio::null());
        cmd
    }

    fn run<S: AsRef<str>>(
        &self,
        repo: &RepositoryLocation,
        args: &[S],
    ) -> Result<Output, GitError> {
        debug!(repo = %repo.path().display(), command = %describe(args), "running git");
        self.command(repo, args)
            .output()
            .map_err(|source| GitError::Spawn {
                command: describe(args),
                source,
            })
    }
}

impl DiffProvider for GitCli {
    fn fetch(&self, repo: &RepositoryLocation, remote: &str) -> Result<(), GitError> {
        let args = ["fetch", remote];
        let output = self.run(repo, &args)?;
        if !output.status.success() {
            return Err(command_failed(&args, &output));
        }
        Ok(())
    }

    fn list_remote_branches(&self, repo: &RepositoryLocation) -> Result<Vec<String>, GitError> {
        let args = ["branch", "-r", "--no-color"];
        let output = self.run(repo, &args)?;
        if !output.status.success() {
            return Err(command_failed(&args, &output));
        }
        Ok(parse_branch_listing(&String::from_utf8_lossy(&output.stdout)))
    }

    fn merge_base(
        &self,
        repo: &RepositoryLocation,
        a: &CommitRef,
        b: &CommitRef,
    ) -> Result<Option<CommitRef>, GitError> {
        let args = ["merge-base", a.as_str(), b.as_str()];
        let output = self.run(repo, &args)?;
        match output.status.code() {
            Some(0) => {
                let base = String::from_utf8_lossy(&output.stdout).trim().to_string();
                Ok((!base.is_empty()).then(|| CommitRef::from_git(base)))
            }
            // merge-base exits 1 without output when the histories are unrelated
            Some(1) if output.stdout.is_empty() && output.stderr.is_empty() => Ok(None),
            _ => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(GitError::CommitNotFound {
                    reference: unresolved_ref(&stderr, &[a, b]),
                })
            }
        }
    }

    fn parents_of(
        &self,
        repo: &RepositoryLocation,
        commit: &CommitRef,
    ) -> Result<Vec<String>, GitError> {
        let args = ["rev-list", "--parents", "-n", "1", commit.as_str()];
        let output = self.run(repo, &args)?;
        if !output.status.success() {
            return Err(GitError::CommitNotFound {
                reference: commit.to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout)
            .split_whitespace()
            .map(str::to_string)
            .collect())
    }

    fn log(&self, repo: &RepositoryLocation, filter: &LogFilter) -> Result<String, GitError> {
        let args = filter.args();
        let output = self.run(repo, args.as_slice())?;
        if !output.status.success() {
            return Err(command_failed(args.as_slice(), &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn diff_into(
        &self,
        repo: &RepositoryLocation,
        left: &CommitRef,
        right: &CommitRef,
        sink: File,
    ) -> Result<CommandOutcome, GitError> {
        let args = ["diff", "--no-color", left.as_str(), right.as_str()];
        debug!(repo = %repo.path().display(), command = %describe(&args), "running git");
        let output = self
            .command(repo, &args)
            .stdout(Stdio::from(sink))
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| GitError::Spawn {
                command: describe(&args),
                source,
            })?;
        Ok(CommandOutcome {
            status: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Parse `git branch -r` output into branch names
///
/// Symbolic entries such as `origin/HEAD -> origin/main` are skipped.
#[must_use]
pub fn parse_branch_listing(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains(" -> "))
        .map(str::to_string)
        .collect()
}

fn describe<S: AsRef<str>>(args: &[S]) -> String {
    let mut line = String::from("git");
    for arg in args {
        line.push(' ');
        line.push_str(arg.as_ref());
    }
    line
}

fn command_failed<S: AsRef<str>>(args: &[S], output: &Output) -> GitError {
    GitError::CommandFailed {
        command: describe(args),
        status: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

/// Pick the ref git complained about, or all of them if unclear
fn unresolved_ref(stderr: &str, candidates: &[&CommitRef]) -> String {
    candidates
        .iter()
        .find(|c| stderr.contains(c.as_str()))
        .map(|c| c.to_string())
        .unwrap_or_else(|| {
            candidates
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
}
