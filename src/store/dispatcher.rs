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

// Selector-to-store dispatch over the four fixed backends

use super::backend::{RecordStore, StoreError};
use super::csv_table::CsvTableStore;
use super::json_array::JsonArrayStore;
use super::relational::RelationalStore;
use super::text_line::TextLineStore;
use crate::config::StorageConfig;
use std::sync::Arc;
use tracing::info;

/// The closed set of backend selector tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Txt,
    Json,
    Csv,
    Db,
}

impl Selector {
    pub const ALL: [Selector; 4] = [Selector::Txt, Selector::Json, Selector::Csv, Selector::Db];

    /// Parse a caller-supplied token. Unknown tokens are not an error;
    /// callers fall back to the landing view without touching a store.
    pub fn parse(token: &str) -> Option<Selector> {
        match token {
            "txt" => Some(Selector::Txt),
            "json" => Some(Selector::Json),
            "csv" => Some(Selector::Csv),
            "db" => Some(Selector::Db),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Selector::Txt => "txt",
            Selector::Json => "json",
            Selector::Csv => "csv",
            Selector::Db => "db",
        }
    }

    /// Per-backend default submission used when the caller supplies no
    /// name/email.
    pub fn default_submission(&self) -> (&'static str, &'static str) {
        match self {
            Selector::Txt => ("Usuario TXT", "usuario.txt@example.com"),
            Selector::Json => ("Usuario JSON", "usuario.json@example.com"),
            Selector::Csv => ("Usuario CSV", "usuario.csv@example.com"),
            Selector::Db => ("Usuario DB", "usuario.db@example.com"),
        }
    }
}

/// The four store singletons, built once at startup and shared by every
/// request for the lifetime of the process.
pub struct StoreSet {
    text: Arc<TextLineStore>,
    json: Arc<JsonArrayStore>,
    csv: Arc<CsvTableStore>,
    db: Arc<RelationalStore>,
}

impl StoreSet {
    pub fn from_config(config: &StorageConfig) -> Result<Self, StoreError> {
        info!(
            "Building store set: data_dir={}, db={}",
            config.data_dir,
            config.db_path().display()
        );
        Ok(Self {
            text: Arc::new(TextLineStore::new(config.text_path())),
            json: Arc::new(JsonArrayStore::new(config.json_path())),
            csv: Arc::new(CsvTableStore::new(config.csv_path())),
            db: Arc::new(RelationalStore::open(&config.db_path())?),
        })
    }

    pub fn get(&self, selector: Selector) -> Arc<dyn RecordStore> {
        match selector {
            Selector::Txt => self.text.clone(),
            Selector::Json => self.json.clone(),
            Selector::Csv => self.csv.clone(),
            Selector::Db => self.db.clone(),
        }
    }

    /// Initialize every backing resource. Idempotent, called once at
    /// startup before the first request.
    pub async fn initialize_all(&self) -> Result<(), StoreError> {
        for selector in Selector::ALL {
            self.get(selector).initialize().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> StorageConfig {
        StorageConfig {
            data_dir: temp_dir.path().join("datos").to_string_lossy().to_string(),
            db_dir: temp_dir
                .path()
                .join("database")
                .to_string_lossy()
                .to_string(),
            ..StorageConfig::default()
        }
    }

    #[test]
    fn test_selector_parse_known_tokens() {
        assert_eq!(Selector::parse("txt"), Some(Selector::Txt));
        assert_eq!(Selector::parse("json"), Some(Selector::Json));
        assert_eq!(Selector::parse("csv"), Some(Selector::Csv));
        assert_eq!(Selector::parse("db"), Some(Selector::Db));
    }

    #[test]
    fn test_selector_parse_unknown_tokens() {
        assert_eq!(Selector::parse("xml"), None);
        assert_eq!(Selector::parse(""), None);
        assert_eq!(Selector::parse("TXT"), None);
    }

    #[test]
    fn test_default_submissions_follow_backend() {
        let (name, email) = Selector::Txt.default_submission();
        assert_eq!(name, "Usuario TXT");
        assert_eq!(email, "usuario.txt@example.com");

        let (name, email) = Selector::Db.default_submission();
        assert_eq!(name, "Usuario DB");
        assert_eq!(email, "usuario.db@example.com");
    }

    #[test]
    fn test_store_set_maps_selector_to_kind() {
        let temp_dir = TempDir::new().unwrap();
        let stores = StoreSet::from_config(&test_config(&temp_dir)).unwrap();

        for selector in Selector::ALL {
            assert_eq!(stores.get(selector).store_kind(), selector.as_str());
        }
    }

    #[tokio::test]
    async fn test_initialize_all_creates_every_resource() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let stores = StoreSet::from_config(&config).unwrap();

        stores.initialize_all().await.unwrap();

        assert!(config.text_path().exists());
        assert!(config.json_path().exists());
        assert!(config.csv_path().exists());
        assert!(config.db_path().exists());

        // Second pass must be a no-op
        stores.initialize_all().await.unwrap();
    }

    #[tokio::test]
    async fn test_stores_are_independent() {
        let temp_dir = TempDir::new().unwrap();
        let stores = StoreSet::from_config(&test_config(&temp_dir)).unwrap();
        stores.initialize_all().await.unwrap();

        stores
            .get(Selector::Txt)
            .append("Ada", "ada@example.com")
            .await
            .unwrap();

        assert_eq!(stores.get(Selector::Txt).list_all().await.unwrap().len(), 1);
        for selector in [Selector::Json, Selector::Csv, Selector::Db] {
            assert!(stores.get(selector).list_all().await.unwrap().is_empty());
        }
    }
}
