//! Configuration management
//!
//! Settings live in `settings.json` inside the bankline directory:
//! ```json
//! {
//!   "app": { "defaultBankName": "Bancolombia", "logging": true, ... }
//! }
//! ```
//! Keys the library does not manage are preserved when saving.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const SETTINGS_FILE: &str = "settings.json";

/// Bank name used when a scenario does not name one
pub const DEFAULT_BANK_NAME: &str = "Bankline";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    logging: Option<bool>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Bankline configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub default_bank_name: String,
    pub logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_bank_name: DEFAULT_BANK_NAME.to_string(),
            logging: true,
        }
    }
}

impl Config {
    /// Load config from the bankline directory
    ///
    /// The event log can be switched off via the settings file or the
    /// BANKLINE_LOGGING environment variable (the variable wins).
    pub fn load(bankline_dir: &Path) -> Result<Self> {
        let raw = read_settings(bankline_dir)?;

        let logging = match std::env::var("BANKLINE_LOGGING").ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => false,
            _ => raw.app.logging.unwrap_or(true),
        };

        let default_bank_name = raw
            .app
            .default_bank_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BANK_NAME.to_string());

        Ok(Self {
            default_bank_name,
            logging,
        })
    }

    /// Save config to the bankline directory
    /// Preserves other settings that bankline doesn't manage
    pub fn save(&self, bankline_dir: &Path) -> Result<()> {
        let mut settings = read_settings(bankline_dir)?;

        settings.app.default_bank_name = Some(self.default_bank_name.clone());
        settings.app.logging = Some(self.logging);

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(bankline_dir.join(SETTINGS_FILE), content)
            .with_context(|| format!("Failed to write settings in {:?}", bankline_dir))?;
        Ok(())
    }
}

fn read_settings(bankline_dir: &Path) -> Result<SettingsFile> {
    let settings_path = bankline_dir.join(SETTINGS_FILE);
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_settings_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.default_bank_name, DEFAULT_BANK_NAME);
    }

    #[test]
    fn test_load_reads_app_settings() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{ "app": { "defaultBankName": "Bancolombia" } }"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.default_bank_name, "Bancolombia");
    }

    #[test]
    fn test_corrupt_settings_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "{ not json").unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.default_bank_name, DEFAULT_BANK_NAME);
    }

    #[test]
    fn test_save_preserves_unknown_keys() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{ "app": { "theme": "dark" }, "plugins": { "x": 1 } }"#,
        )
        .unwrap();

        let mut config = Config::load(dir.path()).unwrap();
        config.default_bank_name = "Bancolombia".to_string();
        config.save(dir.path()).unwrap();

        let saved: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join(SETTINGS_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(saved["app"]["theme"], "dark");
        assert_eq!(saved["app"]["defaultBankName"], "Bancolombia");
        assert_eq!(saved["plugins"]["x"], 1);
    }
}
