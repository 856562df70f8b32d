// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! diffex: write commit, merge and branch diffs from git history to files

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use diffex::commands;
use diffex::config::Config;
use diffex::store::ConfigStore;
use diffex_git::Engine;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = Config::parse();

    // Logs go to stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(config.log_level().into()))
        .with_writer(io::stderr)
        .init();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    let Some(command) = &config.command else {
        Config::command()
            .print_help()
            .context("Failed to print help")?;
        return Ok(());
    };

    let mut store = ConfigStore::load(config.config_path());
    debug!(path = %store.path().display(), "loaded settings");
    let engine = Engine::git().with_remote(config.remote());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::execute(config, command, &engine, &mut store, &mut out)?;
    Ok(())
}
