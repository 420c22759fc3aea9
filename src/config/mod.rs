// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and
//! saving user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[payment]` - The payment request shown on startup and the exchange-rate
//!   source used while the confirmation dialog is open
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable
//! deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with an explicit path
//! 2. Pass a directory override (the `--config-dir` flag)
//! 3. Set the `PAYPROMPT_CONFIG_DIR` environment variable
//! 4. Falls back to the platform-specific config directory

use crate::error::Result;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "PayPrompt";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "PAYPROMPT_CONFIG_DIR";

pub const DEFAULT_RATE_REFRESH_SECS: u64 = 30;
pub const DEFAULT_AMOUNT_UNITS: i64 = 100_000_000;

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

/// The payment request presented on startup, plus rate-source settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct PaymentConfig {
    /// Dialog title, shown verbatim.
    #[serde(default = "default_title")]
    pub title: String,

    /// Dialog message as an HTML-subset markup string.
    #[serde(default = "default_message")]
    pub message: String,

    /// Amount in smallest coin units.
    #[serde(default = "default_amount")]
    pub amount: i64,

    /// Fiat currency code quoted by the rate source.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Fixed fiat-per-coin quote, as a decimal string. When unset and no
    /// rates file is given, the rate is treated as unavailable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiat_per_coin: Option<String>,

    /// How often the rate source is polled while the dialog is open.
    #[serde(default = "default_rate_refresh_secs")]
    pub rate_refresh_secs: u64,

    /// Path to a TOML rate document, taking precedence over `fiat-per-coin`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rates_file: Option<PathBuf>,
}

fn default_title() -> String {
    "Confirm payment".to_string()
}

fn default_message() -> String {
    "<b>Pay now?</b><br/>The amount below will be deducted from your balance.".to_string()
}

fn default_amount() -> i64 {
    DEFAULT_AMOUNT_UNITS
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_rate_refresh_secs() -> u64 {
    DEFAULT_RATE_REFRESH_SECS
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            message: default_message(),
            amount: default_amount(),
            currency: default_currency(),
            fiat_per_coin: None,
            rate_refresh_secs: default_rate_refresh_secs(),
            rates_file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub payment: PaymentConfig,
}

fn resolve_config_dir(dir_override: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = dir_override {
        return Some(dir.to_path_buf());
    }
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Loads the configuration, falling back to defaults.
///
/// Returns the config together with an optional notification key describing a
/// load problem; the caller surfaces it as a warning toast so a corrupt file
/// never blocks startup.
pub fn load(dir_override: Option<&Path>) -> (Config, Option<&'static str>) {
    let Some(path) = resolve_config_dir(dir_override).map(|dir| dir.join(CONFIG_FILE)) else {
        return (Config::default(), None);
    };
    if !path.exists() {
        return (Config::default(), None);
    }
    match load_from_path(&path) {
        Ok(config) => (config, None),
        Err(_) => (Config::default(), Some("notification-config-load-error")),
    }
}

/// Saves the configuration to the resolved config directory.
pub fn save(config: &Config, dir_override: Option<&Path>) -> Result<()> {
    if let Some(path) = resolve_config_dir(dir_override).map(|dir| dir.join(CONFIG_FILE)) {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
