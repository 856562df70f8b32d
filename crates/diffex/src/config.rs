// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Command-line configuration for diffex
//!
//! Global options pick the repository, output directory, settings file and
//! remote. Each can also come from the environment; anything left unset
//! falls back to the stored settings (see [`crate::store`]).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use diffex_git::DiffSelectionMode;
use diffex_git::refs::DEFAULT_REMOTE;

/// diffex - write commit, merge and branch diffs from git history to files
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "diffex")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Repository working copy
    ///
    /// Defaults to the last repository used, then to the repository
    /// containing the current directory.
    #[arg(short, long, global = true, env = "DIFFEX_REPO")]
    pub repo: Option<PathBuf>,

    /// Directory diff files are written to
    ///
    /// Defaults to the last output directory used.
    #[arg(short, long, global = true, env = "DIFFEX_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Settings file
    ///
    /// Defaults to diffex/config.json under the platform config directory.
    #[arg(long, global = true, env = "DIFFEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Remote that bare branch names are qualified with and fetched from
    #[arg(long, global = true, env = "DIFFEX_REMOTE")]
    pub remote: Option<String>,

    /// Enable verbose logging (debug level), including every git invocation
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - only warnings and errors are logged
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Write one diff file per commit
    ///
    /// A merge commit is diffed first parent against second parent, which
    /// shows what the two sides disagreed on. A commit with one parent is
    /// diffed against that parent. Root commits are skipped.
    ///
    /// Example:
    ///   diffex commits 1945ab9,c460aeb --mode merges
    Commits {
        /// Commit hashes, separated by commas or spaces
        #[arg(required = true, num_args = 1..)]
        hashes: Vec<String>,

        /// How the commits were selected
        #[arg(long, value_enum, default_value_t = ModeArg::All)]
        mode: ModeArg,

        /// Open each written file with the default application
        #[arg(long)]
        open: bool,
    },

    /// Write everything a branch added since it left the base branch
    ///
    /// Both names are qualified with the remote, so `feature/login` means
    /// `origin/feature/login`. The result is written to
    /// all_commits_on_<branch>.diff.
    Branch {
        /// Branch to diff
        target: String,

        /// Base branch (defaults to the stored origin branch)
        #[arg(long)]
        base: Option<String>,

        /// Do not fetch from the remote first
        #[arg(long)]
        no_fetch: bool,

        /// Open the written file with the default application
        #[arg(long)]
        open: bool,
    },

    /// List commits from the log
    Log {
        /// Which commits to list
        #[arg(long, value_enum, default_value_t = ModeArg::All)]
        mode: ModeArg,

        /// Keep only entries containing this text, ignoring case
        #[arg(long)]
        query: Option<String>,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// List remote-tracking branches
    Branches {
        /// Keep only branches containing this text, ignoring case
        #[arg(long)]
        query: Option<String>,

        /// Do not fetch from the remote first
        #[arg(long)]
        no_fetch: bool,
    },

    /// Show or change stored settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Settings subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print stored settings
    Show,
    /// Remember a repository directory
    SetRepo {
        /// Repository working copy
        dir: PathBuf,
    },
    /// Remember an output directory
    SetOutput {
        /// Directory for diff files
        dir: PathBuf,
    },
    /// Remember the base branch used by `branch`
    SetOrigin {
        /// Branch name, bare or remote-qualified
        branch: String,
    },
}

/// Commit selection mode as typed on the command line
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModeArg {
    /// Every commit
    #[default]
    All,
    /// Merge commits
    Merges,
    /// Pull request merges
    Prs,
}

impl From<ModeArg> for DiffSelectionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::All => Self::AllDiffs,
            ModeArg::Merges => Self::OnlyMerges,
            ModeArg::Prs => Self::OnlyPullRequests,
        }
    }
}

impl Config {
    /// Get the settings file path, using a default if not specified
    ///
    /// Default location is platform-specific:
    /// - macOS: ~/Library/Application Support/diffex/config.json
    /// - Linux: ~/.config/diffex/config.json
    /// - Windows: %APPDATA%\diffex\config.json
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("diffex")
                .join("config.json")
        })
    }

    /// The remote to qualify refs with
    #[must_use]
    pub fn remote(&self) -> &str {
        self.remote
            .as_deref()
            .filter(|remote| !remote.trim().is_empty())
            .unwrap_or(DEFAULT_REMOTE)
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}
