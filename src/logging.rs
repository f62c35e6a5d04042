use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{AppError, Result};

/// Sends tracing output to `<data_dir>/pesa.log`; the terminal belongs to the UI.
pub fn init(config: &Config) -> Result<()> {
    fs::create_dir_all(&config.data_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())?;

    let filter = EnvFilter::try_new(&config.log_filter)
        .map_err(|e| AppError::Config(format!("Invalid log filter {}: {e}", config.log_filter)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::Config(format!("Logger already initialised: {e}")))?;

    Ok(())
}
