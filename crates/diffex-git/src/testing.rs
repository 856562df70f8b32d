// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Scripted provider for unit tests

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;

use tempfile::TempDir;

use crate::error::GitError;
use crate::provider::{CommandOutcome, DiffProvider, LogFilter};
use crate::refs::CommitRef;
use crate::repo::RepositoryLocation;

/// Answers git questions from canned data and records every call
#[derive(Default)]
pub struct ScriptedProvider {
    /// `rev-list --parents` tokens by commit, commit itself first
    pub parents: HashMap<String, Vec<String>>,
    /// Merge base by (a, b)
    pub merge_bases: HashMap<(String, String), String>,
    /// Raw log text by filter
    pub logs: Vec<(LogFilter, String)>,
    /// Remote branch names
    pub branches: Vec<String>,
    /// Diff text written for every diff call
    pub diff_text: String,
    /// Exit status reported for diff calls
    pub diff_status: Option<i32>,
    /// Fail fetches with this stderr
    pub fetch_error: Option<String>,
    /// Call log, one line per operation
    pub calls: RefCell<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            diff_status: Some(0),
            ..Default::default()
        }
    }

    pub fn with_parents(mut self, commit: &str, tokens: &[&str]) -> Self {
        self.parents.insert(
            commit.to_string(),
            tokens.iter().map(|t| (*t).to_string()).collect(),
        );
        self
    }

    pub fn with_merge_base(mut self, a: &str, b: &str, base: &str) -> Self {
        self.merge_bases
            .insert((a.to_string(), b.to_string()), base.to_string());
        self
    }

    pub fn with_log(mut self, filter: LogFilter, raw: &str) -> Self {
        self.logs.push((filter, raw.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn diff_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with("diff "))
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl DiffProvider for ScriptedProvider {
    fn fetch(&self, _repo: &RepositoryLocation, remote: &str) -> Result<(), GitError> {
        self.record(format!("fetch {remote}"));
        match &self.fetch_error {
            Some(stderr) => Err(GitError::CommandFailed {
                command: format!("git fetch {remote}"),
                status: Some(128),
                stderr: stderr.clone(),
            }),
            None => Ok(()),
        }
    }

    fn list_remote_branches(&self, _repo: &RepositoryLocation) -> Result<Vec<String>, GitError> {
        self.record("branch -r".to_string());
        Ok(self.branches.clone())
    }

    fn merge_base(
        &self,
        _repo: &RepositoryLocation,
        a: &CommitRef,
        b: &CommitRef,
    ) -> Result<Option<CommitRef>, GitError> {
        self.record(format!("merge-base {a} {b}"));
        let base = self
            .merge_bases
            .get(&(a.to_string(), b.to_string()))
            .filter(|base| !base.is_empty())
            .map(|base| CommitRef::from_git(base.clone()));
        Ok(base)
    }

    fn parents_of(
        &self,
        _repo: &RepositoryLocation,
        commit: &CommitRef,
    ) -> Result<Vec<String>, GitError> {
        self.record(format!("rev-list {commit}"));
        self.parents
            .get(commit.as_str())
            .cloned()
            .ok_or_else(|| GitError::CommitNotFound {
                reference: commit.to_string(),
            })
    }

    fn log(&self, _repo: &RepositoryLocation, filter: &LogFilter) -> Result<String, GitError> {
        self.record(filter.args().join(" "));
        Ok(self
            .logs
            .iter()
            .find(|(f, _)| f == filter)
            .map(|(_, raw)| raw.clone())
            .unwrap_or_default())
    }

    fn diff_into(
        &self,
        _repo: &RepositoryLocation,
        left: &CommitRef,
        right: &CommitRef,
        mut sink: File,
    ) -> Result<CommandOutcome, GitError> {
        self.record(format!("diff {left} {right}"));
        sink.write_all(self.diff_text.as_bytes())?;
        Ok(CommandOutcome {
            status: self.diff_status,
            stderr: if self.diff_status == Some(0) {
                String::new()
            } else {
                "fatal: bad revision".to_string()
            },
        })
    }
}

/// An empty working copy to satisfy [`RepositoryLocation`] validation
pub fn scratch_repo() -> (TempDir, RepositoryLocation) {
    let dir = tempfile::tempdir().expect("tempdir");
    git2::Repository::init(dir.path()).expect("init repo");
    let location = RepositoryLocation::open(dir.path()).expect("open repo");
    (dir, location)
}

pub fn commit_ref(value: &str) -> CommitRef {
    CommitRef::new(value).expect("valid ref")
}
