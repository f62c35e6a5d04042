use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{AppError, Result};

pub const DEFAULT_STORAGE_KEY: &str = "transactions";
pub const DEFAULT_CURRENCY: &str = "Kes";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime settings, taken from `PESA_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub currency: String,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let data_dir = var("PESA_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let storage_key = var("PESA_STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.into());
        if !storage_key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(AppError::Config(format!(
                "Invalid storage key: {storage_key} (use letters, digits, '_' or '-')"
            )));
        }

        let currency = lookup("PESA_CURRENCY").unwrap_or_else(|| DEFAULT_CURRENCY.into());
        if currency.is_empty() {
            return Err(AppError::Config("Currency prefix must not be empty".into()));
        }

        let log_filter = var("PESA_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.into());

        Ok(Self {
            data_dir,
            storage_key,
            currency,
            log_filter,
        })
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("pesa.log")
    }
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "pesa")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".pesa"))
}
