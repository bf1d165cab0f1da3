use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::engine::{SavingsPolicy, DEFAULT_PLACEHOLDER_NAME};

pub(crate) const CONFIG_FILE: &str = "config.json";

fn default_budget() -> Decimal {
    Decimal::new(10_000, 0)
}

fn default_currency_symbol() -> String {
    "¥".into()
}

fn default_placeholder_name() -> String {
    DEFAULT_PLACEHOLDER_NAME.into()
}

/// User settings read from `config.json`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    /// Starting monthly budget for every session.
    #[serde(default = "default_budget")]
    pub(crate) default_budget: Decimal,
    #[serde(default)]
    pub(crate) savings_policy: SavingsPolicy,
    #[serde(default = "default_currency_symbol")]
    pub(crate) currency_symbol: String,
    #[serde(default = "default_placeholder_name")]
    pub(crate) placeholder_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_budget: default_budget(),
            savings_policy: SavingsPolicy::default(),
            currency_symbol: default_currency_symbol(),
            placeholder_name: default_placeholder_name(),
        }
    }
}

impl Config {
    /// Load settings from a JSON file. A missing file yields the defaults.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Reading config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("Parsing config JSON in {}", path.display()))?;
        if config.default_budget < Decimal::ZERO {
            anyhow::bail!(
                "default_budget must not be negative (got {}) in {}",
                config.default_budget,
                path.display()
            );
        }
        Ok(config)
    }
}

/// Data and config locations for this user.
#[derive(Debug, Clone)]
pub(crate) struct Paths {
    pub(crate) data_dir: PathBuf,
    pub(crate) config_dir: PathBuf,
}

impl Paths {
    pub(crate) fn resolve() -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "subsave", "SubSave")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let paths = Self {
            data_dir: proj_dirs.data_dir().to_path_buf(),
            config_dir: proj_dirs.config_dir().to_path_buf(),
        };
        std::fs::create_dir_all(&paths.data_dir).with_context(|| {
            format!(
                "Failed to create data directory: {}",
                paths.data_dir.display()
            )
        })?;
        Ok(paths)
    }

    pub(crate) fn db_path(&self) -> PathBuf {
        self.data_dir.join("subsave.db")
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.data_dir.join("subsave.log")
    }

    pub(crate) fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
