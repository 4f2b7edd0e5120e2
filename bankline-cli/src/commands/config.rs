//! Config command - show or change settings.json

use anyhow::Result;
use colored::Colorize;

use bankline_core::config::{Config, SETTINGS_FILE};

use super::get_bankline_dir;
use crate::output;

pub fn run(bank_name: Option<String>, logging: Option<bool>, json: bool) -> Result<()> {
    let bankline_dir = get_bankline_dir();
    std::fs::create_dir_all(&bankline_dir)?;

    let mut config = Config::load(&bankline_dir)?;
    let changed = bank_name.is_some() || logging.is_some();

    if let Some(name) = bank_name {
        if name.trim().is_empty() {
            anyhow::bail!("Bank name cannot be empty");
        }
        config.default_bank_name = name;
    }
    if let Some(enabled) = logging {
        config.logging = enabled;
    }
    if changed {
        config.save(&bankline_dir)?;
    }

    if json {
        println!(
            "{}",
            serde_json::json!({
                "defaultBankName": config.default_bank_name,
                "logging": config.logging,
            })
        );
        return Ok(());
    }

    if changed {
        output::success(&format!(
            "Saved {}",
            bankline_dir.join(SETTINGS_FILE).display()
        ));
    }
    println!("  {}: {}", "Default bank".bold(), config.default_bank_name);
    println!("  {}: {}", "Event log".bold(), if config.logging { "on" } else { "off" });

    Ok(())
}
