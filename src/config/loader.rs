// Configuration loader with environment variable substitution

use super::types::*;
use anyhow::{bail, Context, Result};
use regex::Regex;
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file with environment variable substitution
    pub fn load<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read config file")?;

        // Substitute environment variables
        let content = Self::substitute_env_vars(&content);

        // Parse YAML
        let config: AppConfig =
            serde_yaml::from_str(&content).context("Failed to parse YAML configuration")?;

        // Validate configuration
        Self::validate(&config)?;

        Ok(config)
    }

    /// Substitute ${VAR} and ${VAR:-default} patterns with environment variables
    ///
    /// Examples:
    /// - ${HOME} -> /home/user
    /// - ${DATA_DIR:-datos} -> datos (if DATA_DIR not set)
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}:]+)(?::-([^}]+))?\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            let default_value = caps.get(2).map(|m| m.as_str());

            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if let Some(default) = default_value {
                        default.to_string()
                    } else {
                        // Keep original if no default and var not found
                        format!("${{{}}}", var_name)
                    }
                }
            }
        })
        .to_string()
    }

    /// Validate configuration
    fn validate(config: &AppConfig) -> Result<()> {
        if config.storage.data_dir.is_empty() {
            bail!("storage.data_dir cannot be empty");
        }

        if config.storage.db_dir.is_empty() {
            bail!("storage.db_dir cannot be empty");
        }

        for (field, value) in [
            ("storage.text_file", &config.storage.text_file),
            ("storage.json_file", &config.storage.json_file),
            ("storage.csv_file", &config.storage.csv_file),
            ("storage.db_file", &config.storage.db_file),
        ] {
            if value.is_empty() {
                bail!("{} cannot be empty", field);
            }
        }

        if config.server.bind_addr.parse::<std::net::SocketAddr>().is_err() {
            bail!(
                "server.bind_addr is not a valid socket address: '{}'",
                config.server.bind_addr
            );
        }

        match config.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            unknown => bail!("logging.level '{}' is not a known level", unknown),
        }

        Ok(())
    }
}
