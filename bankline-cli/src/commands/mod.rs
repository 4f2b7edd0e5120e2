//! CLI command implementations

pub mod account;
pub mod config;
pub mod demo;
pub mod logs;
pub mod run;
pub mod transfer;

use std::path::PathBuf;

use anyhow::{Context, Result};
use bankline_core::config::Config;
use bankline_core::{BanklineContext, EventLog, Source};
use thiserror::Error;

/// A failure whose details were already written to stdout (JSON envelope
/// or report). `main` records it but does not print it again.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct Reported(pub String);

/// Open the event log for CLI runs
///
/// Returns None if logging is disabled or the log cannot be opened
/// (recording must never block a command)
pub fn open_event_log() -> Option<EventLog> {
    let bankline_dir = get_bankline_dir();
    std::fs::create_dir_all(&bankline_dir).ok()?;
    let config = Config::load(&bankline_dir).unwrap_or_default();
    if !config.logging {
        return None;
    }
    EventLog::open(&bankline_dir, Source::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Record how a command ended, ignoring any error from the log itself
pub fn record_outcome<T>(log: Option<&EventLog>, command: &str, result: &Result<T>) {
    let Some(log) = log else {
        return;
    };
    let _ = match result {
        Ok(_) => log.record_ok(command),
        Err(e) => log.record_failure(command, &format!("{:#}", e)),
    };
}

/// Get the bankline directory from environment or default
pub fn get_bankline_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BANKLINE_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .map(|home| home.join(".bankline"))
        .unwrap_or_else(|| PathBuf::from(".bankline"))
}

/// Get or create bankline context
pub fn get_context() -> Result<BanklineContext> {
    let bankline_dir = get_bankline_dir();

    std::fs::create_dir_all(&bankline_dir)
        .with_context(|| format!("Failed to create bankline directory: {:?}", bankline_dir))?;

    BanklineContext::new(&bankline_dir).context("Failed to initialize bankline context")
}
