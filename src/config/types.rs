// Copyright 2025 coScene
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Configuration types for form-recorder

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Storage configuration: one directory for the three file-backed
/// resources and a separate directory for the SQLite database.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_text_file")]
    pub text_file: String,

    #[serde(default = "default_json_file")]
    pub json_file: String,

    #[serde(default = "default_csv_file")]
    pub csv_file: String,

    #[serde(default = "default_db_dir")]
    pub db_dir: String,

    #[serde(default = "default_db_file")]
    pub db_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            text_file: default_text_file(),
            json_file: default_json_file(),
            csv_file: default_csv_file(),
            db_dir: default_db_dir(),
            db_file: default_db_file(),
        }
    }
}

impl StorageConfig {
    pub fn text_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.text_file)
    }

    pub fn json_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.json_file)
    }

    pub fn csv_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.csv_file)
    }

    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.db_dir).join(&self.db_file)
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String, // "trace", "debug", "info", "warn", "error"

    #[serde(default = "default_log_format")]
    pub format: String, // "text", "json"
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Default value functions
fn default_data_dir() -> String { "datos".to_string() }
fn default_text_file() -> String { "datos.txt".to_string() }
fn default_json_file() -> String { "datos.json".to_string() }
fn default_csv_file() -> String { "datos.csv".to_string() }
fn default_db_dir() -> String { "database".to_string() }
fn default_db_file() -> String { "usuarios.db".to_string() }
fn default_bind_addr() -> String { "127.0.0.1:8080".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "text".to_string() }
