// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! CLI parsing tests
//!
//! These tests verify argument parsing for every subcommand, global flag
//! placement, and the verbose/quiet log level selection.

use std::path::PathBuf;

use clap::Parser;
use diffex::config::{Command, Config, ConfigAction, ModeArg};
use tracing::Level;

// ============================================================================
// Global flags
// ============================================================================

#[test]
fn test_no_subcommand() {
    let config = Config::try_parse_from(["diffex"]).expect("parse should succeed");
    assert!(config.command.is_none());
}

#[test]
fn test_global_flags_before_subcommand() {
    let config = Config::try_parse_from([
        "diffex", "--repo", "/work/repo", "--output", "/work/out", "--remote", "upstream", "log",
    ])
    .expect("parse should succeed");
    assert_eq!(config.repo, Some(PathBuf::from("/work/repo")));
    assert_eq!(config.output, Some(PathBuf::from("/work/out")));
    assert_eq!(config.remote(), "upstream");
}

#[test]
fn test_global_flags_after_subcommand() {
    let config = Config::try_parse_from(["diffex", "log", "-r", "/work/repo", "-v"])
        .expect("parse should succeed");
    assert_eq!(config.repo, Some(PathBuf::from("/work/repo")));
    assert!(config.verbose);
}

#[test]
fn test_config_file_flag() {
    let config = Config::try_parse_from(["diffex", "--config", "/tmp/diffex.json", "config", "show"])
        .expect("parse should succeed");
    assert_eq!(config.config_path(), PathBuf::from("/tmp/diffex.json"));
}

#[test]
fn test_verbose_and_quiet_levels() {
    let verbose = Config::try_parse_from(["diffex", "-v"]).expect("parse should succeed");
    assert_eq!(verbose.log_level(), Level::DEBUG);

    let quiet = Config::try_parse_from(["diffex", "--quiet"]).expect("parse should succeed");
    assert_eq!(quiet.log_level(), Level::WARN);

    // verbose wins when both are given
    let both = Config::try_parse_from(["diffex", "-v", "-q"]).expect("parse should succeed");
    assert_eq!(both.log_level(), Level::DEBUG);
}

#[test]
fn test_verbose_flag_value_syntax_not_supported() {
    let result = Config::try_parse_from(["diffex", "--verbose=true"]);
    assert!(result.is_err(), "Boolean flags don't support =value syntax");
}

// ============================================================================
// commits
// ============================================================================

#[test]
fn test_commits_defaults() {
    let config =
        Config::try_parse_from(["diffex", "commits", "abc1234"]).expect("parse should succeed");
    match config.command {
        Some(Command::Commits { hashes, mode, open }) => {
            assert_eq!(hashes, vec!["abc1234"]);
            assert_eq!(mode, ModeArg::All);
            assert!(!open);
        }
        other => panic!("Expected commits, got {other:?}"),
    }
}

#[test]
fn test_commits_many_hashes_and_mode() {
    let config = Config::try_parse_from([
        "diffex", "commits", "abc1234,def5678", "0a1b2c3", "--mode", "prs", "--open",
    ])
    .expect("parse should succeed");
    match config.command {
        Some(Command::Commits { hashes, mode, open }) => {
            assert_eq!(hashes, vec!["abc1234,def5678", "0a1b2c3"]);
            assert_eq!(mode, ModeArg::Prs);
            assert!(open);
        }
        other => panic!("Expected commits, got {other:?}"),
    }
}

#[test]
fn test_commits_requires_a_hash() {
    assert!(Config::try_parse_from(["diffex", "commits"]).is_err());
}

#[test]
fn test_commits_rejects_unknown_mode() {
    assert!(Config::try_parse_from(["diffex", "commits", "abc1234", "--mode", "octopus"]).is_err());
}

// ============================================================================
// branch / branches
// ============================================================================

#[test]
fn test_branch_options() {
    let config = Config::try_parse_from([
        "diffex",
        "branch",
        "feature/login",
        "--base",
        "release/2024c",
        "--no-fetch",
    ])
    .expect("parse should succeed");
    match config.command {
        Some(Command::Branch {
            target,
            base,
            no_fetch,
            open,
        }) => {
            assert_eq!(target, "feature/login");
            assert_eq!(base.as_deref(), Some("release/2024c"));
            assert!(no_fetch);
            assert!(!open);
        }
        other => panic!("Expected branch, got {other:?}"),
    }
}

#[test]
fn test_branch_base_is_optional() {
    let config =
        Config::try_parse_from(["diffex", "branch", "topic"]).expect("parse should succeed");
    assert!(matches!(
        config.command,
        Some(Command::Branch { base: None, .. })
    ));
}

#[test]
fn test_branches_query() {
    let config = Config::try_parse_from(["diffex", "branches", "--query", "release"])
        .expect("parse should succeed");
    match config.command {
        Some(Command::Branches { query, no_fetch }) => {
            assert_eq!(query.as_deref(), Some("release"));
            assert!(!no_fetch);
        }
        other => panic!("Expected branches, got {other:?}"),
    }
}

// ============================================================================
// log
// ============================================================================

#[test]
fn test_log_options() {
    let config = Config::try_parse_from([
        "diffex", "log", "--mode", "merges", "--query", "login", "--json",
    ])
    .expect("parse should succeed");
    match config.command {
        Some(Command::Log { mode, query, json }) => {
            assert_eq!(mode, ModeArg::Merges);
            assert_eq!(query.as_deref(), Some("login"));
            assert!(json);
        }
        other => panic!("Expected log, got {other:?}"),
    }
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_config_actions() {
    let cases = [
        (vec!["diffex", "config", "show"], ConfigAction::Show),
        (
            vec!["diffex", "config", "set-repo", "/work/repo"],
            ConfigAction::SetRepo {
                dir: PathBuf::from("/work/repo"),
            },
        ),
        (
            vec!["diffex", "config", "set-output", "/work/out"],
            ConfigAction::SetOutput {
                dir: PathBuf::from("/work/out"),
            },
        ),
        (
            vec!["diffex", "config", "set-origin", "origin/main"],
            ConfigAction::SetOrigin {
                branch: "origin/main".to_string(),
            },
        ),
    ];

    for (args, expected) in cases {
        let config = Config::try_parse_from(args.iter().copied()).expect("parse should succeed");
        match config.command {
            Some(Command::Config { action }) => assert_eq!(action, expected),
            other => panic!("Expected config for {args:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_config_requires_action() {
    assert!(Config::try_parse_from(["diffex", "config"]).is_err());
}
