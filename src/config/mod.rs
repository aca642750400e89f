// Configuration module for form-recorder
//
// Provides:
// - YAML configuration file loading
// - Environment variable substitution
// - Configuration validation
// - Default values

pub mod types;
mod loader;

pub use loader::ConfigLoader;
pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    ConfigLoader::load(path).context("Failed to load configuration")
}

/// Load configuration, falling back to built-in defaults when the file
/// does not exist (the binary runs with zero setup).
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    if path.as_ref().exists() {
        load_config(path)
    } else {
        Ok(AppConfig::default())
    }
}

/// Load configuration with environment variable overrides
pub fn load_config_with_env<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let mut config = load_config_or_default(path)?;

    // Allow environment variables to override config values
    if let Ok(data_dir) = std::env::var("FORM_RECORDER_DATA_DIR") {
        config.storage.data_dir = data_dir;
    }

    if let Ok(db_dir) = std::env::var("FORM_RECORDER_DB_DIR") {
        config.storage.db_dir = db_dir;
    }

    if let Ok(bind_addr) = std::env::var("FORM_RECORDER_BIND_ADDR") {
        config.server.bind_addr = bind_addr;
    }

    Ok(config)
}
