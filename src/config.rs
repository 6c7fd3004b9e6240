//! Where the store lives and which currency unlabeled expenses get.
//!
//! Values are resolved in order, later sources winning: built-in defaults,
//! `config.toml` in the platform config directory, then the
//! `EXPENSE_LEDGER_FILE` / `EXPENSE_LEDGER_CURRENCY` environment variables.
//! A `--file` flag on the command line overrides all of them.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{LedgerError, Result};

pub(crate) const DEFAULT_CURRENCY: &str = "INR";
pub(crate) const STORE_FILE_NAME: &str = "expenses.csv";
const CONFIG_FILE_NAME: &str = "config.toml";

pub(crate) const FILE_ENV: &str = "EXPENSE_LEDGER_FILE";
pub(crate) const CURRENCY_ENV: &str = "EXPENSE_LEDGER_CURRENCY";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Config {
    pub(crate) store_path: PathBuf,
    pub(crate) default_currency: String,
}

/// Shape of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigFile {
    pub(crate) store_path: Option<PathBuf>,
    pub(crate) default_currency: Option<String>,
}

impl Config {
    pub(crate) fn with_store_path(store_path: PathBuf) -> Self {
        Self {
            store_path,
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Resolve the full configuration for this process.
    pub(crate) fn load(file_override: Option<&Path>) -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "expense-ledger", "ExpenseLedger")
            .ok_or_else(|| LedgerError::Config("Could not determine data directory".into()))?;

        let mut config = Self::with_store_path(proj_dirs.data_dir().join(STORE_FILE_NAME));

        let config_file = proj_dirs.config_dir().join(CONFIG_FILE_NAME);
        if config_file.exists() {
            debug!(path = %config_file.display(), "reading config file");
            config.apply_file(read_config_file(&config_file)?);
        }

        config.apply_env(|key| std::env::var(key).ok());

        if let Some(path) = file_override {
            config.store_path = path.to_path_buf();
        }

        config.ensure_store_dir()?;
        debug!(
            store = %config.store_path.display(),
            currency = %config.default_currency,
            "resolved configuration"
        );
        Ok(config)
    }

    pub(crate) fn apply_file(&mut self, file: ConfigFile) {
        if let Some(path) = file.store_path {
            self.store_path = path;
        }
        if let Some(currency) = file.default_currency.filter(|c| !c.trim().is_empty()) {
            self.default_currency = currency.trim().to_string();
        }
    }

    /// Apply environment overrides through `lookup`. Empty values are ignored.
    pub(crate) fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(FILE_ENV).filter(|v| !v.trim().is_empty()) {
            self.store_path = PathBuf::from(path);
        }
        if let Some(currency) = lookup(CURRENCY_ENV).filter(|v| !v.trim().is_empty()) {
            self.default_currency = currency.trim().to_string();
        }
    }

    fn ensure_store_dir(&self) -> Result<()> {
        if let Some(dir) = self.store_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| {
                LedgerError::Config(format!(
                    "Failed to create data directory {}: {e}",
                    dir.display()
                ))
            })?;
        }
        Ok(())
    }
}

pub(crate) fn parse_config_file(contents: &str) -> Result<ConfigFile> {
    toml::from_str(contents)
        .map_err(|e| LedgerError::Config(format!("Failed to parse {CONFIG_FILE_NAME}: {e}")))
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        LedgerError::Config(format!("Failed to read {}: {e}", path.display()))
    })?;
    parse_config_file(&contents)
}
