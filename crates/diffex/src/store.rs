// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Persisted settings
//!
//! A small JSON file remembering the last repository and output directory
//! used, plus the base branch for branch diffs. A missing or unreadable file
//! behaves like an empty one. Every setter writes the file straight away.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

/// Settings store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The settings directory could not be created
    #[error("Failed to create settings directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The settings file could not be written
    #[error("Failed to write settings file {path}: {source}")]
    Write {
        /// File that could not be written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The settings could not be serialized
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Contents of the settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigRecord {
    /// Repository used last
    #[serde(deserialize_with = "blank_as_none")]
    pub last_repo_dir: Option<PathBuf>,
    /// Output directory used last
    #[serde(deserialize_with = "blank_as_none")]
    pub last_output_dir: Option<PathBuf>,
    /// Base branch for branch diffs
    #[serde(deserialize_with = "blank_as_none")]
    pub origin_branch: Option<String>,
}

/// Read `""` and whitespace-only strings as unset
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()).map(T::from))
}

/// Settings bound to a file
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    record: ConfigRecord,
}

impl ConfigStore {
    /// Load settings from `path`
    ///
    /// Never fails: a missing file yields empty settings, and so does a file
    /// that cannot be read or parsed (with a warning).
    #[must_use]
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let record = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring corrupt settings file");
                ConfigRecord::default()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file yet");
                ConfigRecord::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable settings file");
                ConfigRecord::default()
            }
        };
        Self { path, record }
    }

    /// File the settings live in
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current settings
    #[must_use]
    pub fn record(&self) -> &ConfigRecord {
        &self.record
    }

    /// Repository used last
    #[must_use]
    pub fn last_repo_dir(&self) -> Option<&Path> {
        self.record.last_repo_dir.as_deref()
    }

    /// Output directory used last
    #[must_use]
    pub fn last_output_dir(&self) -> Option<&Path> {
        self.record.last_output_dir.as_deref()
    }

    /// Base branch for branch diffs
    #[must_use]
    pub fn origin_branch(&self) -> Option<&str> {
        self.record.origin_branch.as_deref()
    }

    /// Remember a repository directory
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be written.
    pub fn set_last_repo_dir(&mut self, dir: impl Into<PathBuf>) -> Result<(), StoreError> {
        self.record.last_repo_dir = Some(dir.into());
        self.save()
    }

    /// Remember an output directory
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be written.
    pub fn set_last_output_dir(&mut self, dir: impl Into<PathBuf>) -> Result<(), StoreError> {
        self.record.last_output_dir = Some(dir.into());
        self.save()
    }

    /// Remember the base branch
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be written.
    pub fn set_origin_branch(&mut self, branch: impl Into<String>) -> Result<(), StoreError> {
        self.record.origin_branch = Some(branch.into());
        self.save()
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(&self.record)?;
        fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "saved settings");
        Ok(())
    }
}
