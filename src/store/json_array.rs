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

// JSON array backend with read-modify-write appends

use super::backend::{RecordStore, StoreError, FILE_COLUMNS};
use crate::record::Record;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// JSON backend storing a single pretty-printed array of records.
///
/// Every append re-reads, extends, and rewrites the whole array. The
/// rewrite goes through a temp file in the same directory followed by a
/// rename, so a crash mid-write cannot truncate the array. A file with
/// invalid JSON is treated as empty on read rather than surfaced as an
/// error (whole-file reset, not per-entry recovery).
pub struct JsonArrayStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonArrayStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    async fn read_records(&self) -> Vec<Record> {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(records) => records,
                Err(e) => {
                    warn!(
                        "Invalid JSON in {}, treating as empty: {}",
                        self.path.display(),
                        e
                    );
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        }
    }

    async fn write_records(&self, records: &[Record]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records).map_err(StoreError::write)?;

        // Write-temp-then-rename keeps the previous array intact if the
        // process dies mid-write.
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, &bytes).await.map_err(StoreError::write)?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(StoreError::write)?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for JsonArrayStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(StoreError::unavailable)?;
            }
        }
        if !self.path.exists() {
            info!("Creating JSON array file: {}", self.path.display());
            fs::write(&self.path, b"[]")
                .await
                .map_err(StoreError::unavailable)?;
        }
        Ok(())
    }

    async fn append(&self, name: &str, email: &str) -> Result<Record, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read_records().await;
        let record = Record::new(name, email);
        records.push(record.clone());
        self.write_records(&records).await?;

        debug!(
            "Rewrote {} with {} records",
            self.path.display(),
            records.len()
        );
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.read_records().await)
    }

    fn columns(&self) -> &'static [&'static str] {
        FILE_COLUMNS
    }

    fn store_kind(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (JsonArrayStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonArrayStore::new(temp_dir.path().join("datos.json"));
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_initialize_writes_empty_array() {
        let (store, _temp_dir) = create_test_store();
        store.initialize().await.unwrap();
        assert_eq!(std::fs::read_to_string(&store.path).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let (store, _temp_dir) = create_test_store();
        store.initialize().await.unwrap();
        store.append("Ada", "ada@example.com").await.unwrap();

        store.initialize().await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_round_trip_and_ordering() {
        let (store, _temp_dir) = create_test_store();
        store.initialize().await.unwrap();

        let first = store.append("Ada", "ada@example.com").await.unwrap();
        let second = store.append("Grace", "grace@example.com").await.unwrap();

        let records = store.list_all().await.unwrap();
        assert_eq!(records, vec![first, second]);
    }

    #[tokio::test]
    async fn test_invalid_json_reads_as_empty() {
        let (store, _temp_dir) = create_test_store();
        store.initialize().await.unwrap();
        std::fs::write(&store.path, "{not json").unwrap();

        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_recovers_from_invalid_json() {
        let (store, _temp_dir) = create_test_store();
        store.initialize().await.unwrap();
        std::fs::write(&store.path, "{not json").unwrap();

        store.append("Ada", "ada@example.com").await.unwrap();

        // The corrupt content was discarded; the file now holds exactly
        // one valid record.
        let content = std::fs::read_to_string(&store.path).unwrap();
        let records: Vec<Record> = serde_json::from_str(&content).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Ada");
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let (store, _temp_dir) = create_test_store();
        store.initialize().await.unwrap();
        store.append("Ada", "ada@example.com").await.unwrap();

        assert!(!store.path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_records_have_no_id() {
        let (store, _temp_dir) = create_test_store();
        store.initialize().await.unwrap();
        store.append("Ada", "ada@example.com").await.unwrap();

        let content = std::fs::read_to_string(&store.path).unwrap();
        assert!(!content.contains("\"id\""));
    }
}
