// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Open written files with the platform's default application

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

/// Opener errors
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    /// Nothing to open
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// The launcher could not be started
    #[error("Failed to open {path} with {program}: {source}")]
    Launch {
        /// File that was to be opened
        path: PathBuf,
        /// Launcher program
        program: &'static str,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

/// Launcher program and arguments for `path` on this platform
#[must_use]
pub fn launcher(path: &Path) -> (&'static str, Vec<OsString>) {
    if cfg!(target_os = "windows") {
        // `start` treats the first quoted argument as a window title
        (
            "cmd",
            vec!["/C".into(), "start".into(), "".into(), path.into()],
        )
    } else if cfg!(target_os = "macos") {
        ("open", vec![path.into()])
    } else {
        ("xdg-open", vec![path.into()])
    }
}

/// Hand `path` to the default application without waiting for it
///
/// # Errors
///
/// Returns `OpenError::NotFound` if the file does not exist, or
/// `OpenError::Launch` if the launcher cannot be started.
pub fn open_path(path: &Path) -> Result<(), OpenError> {
    if !path.exists() {
        return Err(OpenError::NotFound(path.to_path_buf()));
    }
    let (program, args) = launcher(path);
    debug!(program, path = %path.display(), "opening file");
    Command::new(program)
        .args(&args)
        .spawn()
        .map_err(|source| OpenError::Launch {
            path: path.to_path_buf(),
            program,
            source,
        })?;
    Ok(())
}
