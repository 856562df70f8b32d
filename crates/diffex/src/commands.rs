// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Subcommand execution
//!
//! Resolves the repository and output directory from the command line and
//! the stored settings, calls the engine, and writes user-facing results to
//! the given writer. Logs go to stderr separately.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use diffex_git::request::parse_commit_list;
use diffex_git::{
    BatchReport, BranchDiffRequest, CommitRef, DiffArtifact, DiffProvider, DiffRequest, Engine,
    GitError, ListRequest, RepositoryLocation,
};
use tracing::{info, warn};

use crate::config::{Command, Config, ConfigAction};
use crate::opener::{self, OpenError};
use crate::store::{ConfigStore, StoreError};

/// Errors that end a subcommand
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Git or request error
    #[error(transparent)]
    Git(#[from] GitError),

    /// Settings could not be saved
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A written file could not be opened
    #[error(transparent)]
    Open(#[from] OpenError),

    /// JSON output failed
    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing output failed
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),

    /// Neither the command line nor the settings name a value
    #[error("No {setting} given. {hint}")]
    MissingSetting {
        /// The missing value
        setting: &'static str,
        /// How to provide it
        hint: &'static str,
    },

    /// Path is not an existing directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A commit batch wrote no diff at all
    #[error("No diff was written ({skipped} commit(s) skipped)")]
    NothingWritten {
        /// Number of commits that failed
        skipped: usize,
    },
}

/// Run the subcommand in `config` against `engine` and `store`
///
/// Successful diff commands remember the repository and output directory
/// they used.
///
/// # Errors
///
/// Returns `CommandError` when the operation as a whole fails. Within a
/// commit batch, individual commits may fail without failing the batch.
pub fn execute<P: DiffProvider>(
    config: &Config,
    command: &Command,
    engine: &Engine<P>,
    store: &mut ConfigStore,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    match command {
        Command::Commits { hashes, mode, open } => {
            let repo = resolve_repo(config, store)?;
            let output_dir = resolve_output_dir(config, store)?;
            let commits = parse_commit_list(&hashes.join(" "))?;
            let request = DiffRequest::new(repo, commits, (*mode).into(), output_dir)?;

            let report = engine.run_commit_batch(&request);
            print_report(&report, out)?;
            if !report.is_success() {
                return Err(CommandError::NothingWritten {
                    skipped: report.skipped.len(),
                });
            }
            remember_dirs(store, request.repo(), request.output_dir());
            if *open {
                for artifact in &report.artifacts {
                    open_artifact(artifact);
                }
            }
            Ok(())
        }

        Command::Branch {
            target,
            base,
            no_fetch,
            open,
        } => {
            let repo = resolve_repo(config, store)?;
            let output_dir = resolve_output_dir(config, store)?;
            let base = match base.as_deref().or(store.origin_branch()) {
                Some(base) => CommitRef::new(base)?,
                None => {
                    return Err(CommandError::MissingSetting {
                        setting: "base branch",
                        hint: "Pass --base or run `diffex config set-origin BRANCH`.",
                    });
                }
            };
            let request =
                BranchDiffRequest::new(repo, base, CommitRef::new(target)?, output_dir)?
                    .with_fetch(!no_fetch);

            let artifact = engine.run_branch_diff(&request)?;
            writeln!(out, "wrote {}", artifact.path.display())?;
            remember_dirs(store, request.repo(), request.output_dir());
            if *open {
                open_artifact(&artifact);
            }
            Ok(())
        }

        Command::Log { mode, query, json } => {
            let repo = resolve_repo(config, store)?;
            let request = ListRequest::new(repo, (*mode).into())
                .with_query(query.clone().unwrap_or_default());
            let entries = engine.list_log(&request)?;

            if *json {
                serde_json::to_writer_pretty(&mut *out, &entries)?;
                writeln!(out)?;
            } else {
                for entry in &entries {
                    writeln!(out, "{}  {}", entry.short_hash(), entry.summary())?;
                }
            }
            info!(count = entries.len(), mode = request.mode().as_str(), "listed commits");
            Ok(())
        }

        Command::Branches { query, no_fetch } => {
            let repo = resolve_repo(config, store)?;
            let branches = engine.list_remote_branches(
                &repo,
                query.as_deref().unwrap_or_default(),
                !no_fetch,
            )?;
            for branch in &branches {
                writeln!(out, "{branch}")?;
            }
            Ok(())
        }

        Command::Config { action } => run_config_action(action, store, out),
    }
}

fn run_config_action(
    action: &ConfigAction,
    store: &mut ConfigStore,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    match action {
        ConfigAction::Show => {
            writeln!(out, "# {}", store.path().display())?;
            serde_json::to_writer_pretty(&mut *out, store.record())?;
            writeln!(out)?;
        }
        ConfigAction::SetRepo { dir } => {
            let repo = RepositoryLocation::open(dir)?;
            store.set_last_repo_dir(repo.path())?;
            writeln!(out, "repository: {}", repo.path().display())?;
        }
        ConfigAction::SetOutput { dir } => {
            if !dir.is_dir() {
                return Err(CommandError::NotADirectory(dir.clone()));
            }
            store.set_last_output_dir(dir)?;
            writeln!(out, "output directory: {}", dir.display())?;
        }
        ConfigAction::SetOrigin { branch } => {
            let branch = CommitRef::new(branch)?;
            store.set_origin_branch(branch.as_str())?;
            writeln!(out, "origin branch: {branch}")?;
        }
    }
    Ok(())
}

/// Repository from `--repo`, the stored settings, or the current directory
fn resolve_repo(config: &Config, store: &ConfigStore) -> Result<RepositoryLocation, CommandError> {
    if let Some(dir) = config.repo.as_deref().or(store.last_repo_dir()) {
        return Ok(RepositoryLocation::open(dir)?);
    }
    let cwd = std::env::current_dir()?;
    Ok(RepositoryLocation::discover(cwd)?)
}

/// Output directory from `--output` or the stored settings
fn resolve_output_dir(config: &Config, store: &ConfigStore) -> Result<PathBuf, CommandError> {
    config
        .output
        .as_deref()
        .or(store.last_output_dir())
        .map(Path::to_path_buf)
        .ok_or(CommandError::MissingSetting {
            setting: "output directory",
            hint: "Pass --output or run `diffex config set-output DIR`.",
        })
}

fn print_report(report: &BatchReport, out: &mut impl Write) -> io::Result<()> {
    for warning in &report.warnings {
        writeln!(out, "warning: {warning}")?;
    }
    for skipped in &report.skipped {
        writeln!(out, "skipped {}: {}", skipped.commit, skipped.error)?;
    }
    for artifact in &report.artifacts {
        writeln!(out, "wrote {}", artifact.path.display())?;
    }
    Ok(())
}

/// Save the directories a successful command used; failure only warns
fn remember_dirs(store: &mut ConfigStore, repo: &RepositoryLocation, output_dir: &Path) {
    let saved = store
        .set_last_repo_dir(repo.path())
        .and_then(|()| store.set_last_output_dir(output_dir));
    if let Err(e) = saved {
        warn!(error = %e, "could not save settings");
    }
}

fn open_artifact(artifact: &DiffArtifact) {
    if let Err(e) = opener::open_path(&artifact.path) {
        warn!(error = %e, "could not open diff");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &Path) -> ConfigStore {
        ConfigStore::load(dir.join("config.json"))
    }

    #[test]
    fn test_output_dir_prefers_flag_over_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(dir.path());
        store.set_last_output_dir("/stored/out").expect("save");

        let config = Config {
            output: Some(PathBuf::from("/flag/out")),
            ..Default::default()
        };
        assert_eq!(
            resolve_output_dir(&config, &store).expect("dir"),
            PathBuf::from("/flag/out")
        );
        assert_eq!(
            resolve_output_dir(&Config::default(), &store).expect("dir"),
            PathBuf::from("/stored/out")
        );
    }

    #[test]
    fn test_missing_output_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());
        let result = resolve_output_dir(&Config::default(), &store);
        match result {
            Err(e @ CommandError::MissingSetting { .. }) => {
                assert!(e.to_string().contains("--output"));
            }
            other => panic!("Expected MissingSetting, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_stored_settings_count_as_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"last_repo_dir":"","last_output_dir":"","origin_branch":""}"#,
        )
        .expect("write");
        let store = ConfigStore::load(&path);

        assert!(matches!(
            resolve_output_dir(&Config::default(), &store),
            Err(CommandError::MissingSetting {
                setting: "output directory",
                ..
            })
        ));

        // falls through to discovery instead of opening ""
        let result = resolve_repo(&Config::default(), &store);
        assert!(
            !matches!(result, Err(CommandError::Git(GitError::Validation { .. }))),
            "got {result:?}"
        );
    }

    #[test]
    fn test_repo_flag_must_be_a_repository() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());
        let config = Config {
            repo: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        assert!(matches!(
            resolve_repo(&config, &store),
            Err(CommandError::Git(GitError::RepositoryNotFound { .. }))
        ));
    }

    #[test]
    fn test_config_set_output_requires_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(dir.path());
        let mut out = Vec::new();
        let result = run_config_action(
            &ConfigAction::SetOutput {
                dir: dir.path().join("missing"),
            },
            &mut store,
            &mut out,
        );
        assert!(matches!(result, Err(CommandError::NotADirectory(_))));
        assert_eq!(store.last_output_dir(), None);
    }

    #[test]
    fn test_config_set_origin_rejects_blank() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(dir.path());
        let mut out = Vec::new();
        let result = run_config_action(
            &ConfigAction::SetOrigin {
                branch: "   ".to_string(),
            },
            &mut store,
            &mut out,
        );
        assert!(matches!(
            result,
            Err(CommandError::Git(GitError::Validation { .. }))
        ));
    }

    #[test]
    fn test_config_show_prints_path_and_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(dir.path());
        store.set_origin_branch("origin/main").expect("save");

        let mut out = Vec::new();
        run_config_action(&ConfigAction::Show, &mut store, &mut out).expect("show");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("# "));
        assert!(text.contains("\"origin_branch\": \"origin/main\""));
    }
}
