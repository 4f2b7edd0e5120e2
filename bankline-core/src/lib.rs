//! Bankline Core - accounts, banks and transfers over exact decimals
//!
//! - **domain**: Account and Bank entities, error types
//! - **services**: scenario runs, demo data, shared accounts, event log
//! - **config**: settings.json handling

pub mod config;
pub mod domain;
pub mod event_migrations;
pub mod services;

use std::path::Path;

use anyhow::Result;

use config::Config;
use services::{DemoService, ScenarioService};

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{Account, Bank, BankRef};
pub use services::{EventLog, Source};

/// Main context for Bankline operations
///
/// Holds the loaded configuration and the services built from it.
pub struct BanklineContext {
    pub config: Config,
    pub scenario_service: ScenarioService,
    pub demo_service: DemoService,
}

impl BanklineContext {
    /// Create a new context from the bankline directory
    pub fn new(bankline_dir: &Path) -> Result<Self> {
        let config = Config::load(bankline_dir)?;

        let scenario_service = ScenarioService::new(config.default_bank_name.clone());
        let demo_service = DemoService::new();

        Ok(Self {
            config,
            scenario_service,
            demo_service,
        })
    }

    /// Event log for this directory, or None when logging is switched off
    pub fn event_log(&self, bankline_dir: &Path, source: Source) -> Result<Option<EventLog>> {
        if !self.config.logging {
            return Ok(None);
        }
        EventLog::open(bankline_dir, source, env!("CARGO_PKG_VERSION")).map(Some)
    }
}
