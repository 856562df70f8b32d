// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! diffex library
//!
//! This module exports the command-line layer of diffex for use in
//! integration tests and as a library.

pub mod commands;
pub mod config;
pub mod opener;
pub mod store;
