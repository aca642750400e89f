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

// CSV table backend: header row plus append-only data rows

use super::backend::{RecordStore, StoreError, FILE_COLUMNS};
use crate::record::Record;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// CSV backend: a `name,email,timestamp` header written once at
/// initialization, then one appended row per record.
///
/// Reads map row values to fields by header name, not position, so a
/// row missing a column yields an empty field instead of failing the
/// whole read.
pub struct CsvTableStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvTableStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    fn encode_row(record: &Record) -> Result<Vec<u8>, StoreError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer
            .write_record([&record.name, &record.email, &record.timestamp])
            .map_err(StoreError::write)?;
        writer
            .into_inner()
            .map_err(|e| StoreError::write(e.to_string()))
    }
}

#[async_trait]
impl RecordStore for CsvTableStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(StoreError::unavailable)?;
            }
        }
        if !self.path.exists() {
            info!("Creating CSV table: {}", self.path.display());
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer
                .write_record(FILE_COLUMNS)
                .map_err(StoreError::unavailable)?;
            let bytes = writer
                .into_inner()
                .map_err(|e| StoreError::unavailable(e.to_string()))?;
            fs::write(&self.path, bytes)
                .await
                .map_err(StoreError::unavailable)?;
        }
        Ok(())
    }

    async fn append(&self, name: &str, email: &str) -> Result<Record, StoreError> {
        let _guard = self.write_lock.lock().await;

        let record = Record::new(name, email);
        let row = Self::encode_row(&record)?;

        let mut file = fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .await
            .map_err(StoreError::write)?;
        file.write_all(&row).await.map_err(StoreError::write)?;
        file.flush().await.map_err(StoreError::write)?;

        debug!("Appended CSV row to {}", self.path.display());
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<Record>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(_) => return Ok(Vec::new()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(bytes.as_slice());

        // Column-to-field mapping is driven by the header row, not by
        // position.
        let headers = match reader.headers() {
            Ok(headers) => headers.clone(),
            Err(_) => return Ok(Vec::new()),
        };
        let name_idx = headers.iter().position(|h| h == "name");
        let email_idx = headers.iter().position(|h| h == "email");
        let ts_idx = headers.iter().position(|h| h == "timestamp");

        let field = |row: &csv::StringRecord, idx: Option<usize>| {
            idx.and_then(|i| row.get(i)).unwrap_or_default().to_string()
        };

        let mut records = Vec::new();
        for row in reader.records() {
            match row {
                Ok(row) => records.push(Record {
                    id: None,
                    name: field(&row, name_idx),
                    email: field(&row, email_idx),
                    timestamp: field(&row, ts_idx),
                }),
                // Lenient read: an unparseable row is dropped
                Err(e) => debug!("Dropping malformed CSV row: {}", e),
            }
        }
        Ok(records)
    }

    fn columns(&self) -> &'static [&'static str] {
        FILE_COLUMNS
    }

    fn store_kind(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (CsvTableStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = CsvTableStore::new(temp_dir.path().join("datos.csv"));
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_initialize_writes_header_once() {
        let (store, _temp_dir) = create_test_store();
        store.initialize().await.unwrap();
        store.initialize().await.unwrap();

        let content = std::fs::read_to_string(&store.path).unwrap();
        assert_eq!(content, "name,email,timestamp\n");
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
    async fn test_header_name_mapping() {
        let (store, _temp_dir) = create_test_store();
        std::fs::write(
            &store.path,
            "name,email,timestamp\nAda,ada@example.com,2025-01-01T00:00:00\n",
        )
        .unwrap();

        let records = store.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Ada");
        assert_eq!(records[0].email, "ada@example.com");
        assert_eq!(records[0].timestamp, "2025-01-01T00:00:00");
    }

    #[tokio::test]
    async fn test_reordered_columns_still_map() {
        let (store, _temp_dir) = create_test_store();
        std::fs::write(
            &store.path,
            "timestamp,name,email\n2025-01-01T00:00:00,Ada,ada@example.com\n",
        )
        .unwrap();

        let records = store.list_all().await.unwrap();
        assert_eq!(records[0].name, "Ada");
        assert_eq!(records[0].timestamp, "2025-01-01T00:00:00");
    }

    #[tokio::test]
    async fn test_missing_column_yields_empty_field() {
        let (store, _temp_dir) = create_test_store();
        std::fs::write(&store.path, "name,email\nAda,ada@example.com\n").unwrap();

        let records = store.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Ada");
        assert_eq!(records[0].timestamp, "");
    }

    #[tokio::test]
    async fn test_fields_with_commas_round_trip() {
        let (store, _temp_dir) = create_test_store();
        store.initialize().await.unwrap();

        store.append("Lovelace, Ada", "ada@example.com").await.unwrap();

        let records = store.list_all().await.unwrap();
        assert_eq!(records[0].name, "Lovelace, Ada");
    }
}
