//! metacog-app
//!
//! Application shell around the scoring, progress and storage crates:
//! configuration, logging setup, in-memory state and the `metacog` CLI.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod state;
