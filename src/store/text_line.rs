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

// Append-only pipe-delimited text backend

use super::backend::{RecordStore, StoreError, FILE_COLUMNS};
use crate::record::Record;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Text backend storing one `name | email | timestamp` line per record.
///
/// Appends go to the end of the file; reads are lenient and silently
/// drop lines with fewer than three fields.
pub struct TextLineStore {
    path: PathBuf,
    // Serializes in-process appends; cross-process writers are not
    // coordinated (known limitation shared by all file backends).
    write_lock: Mutex<()>,
}

impl TextLineStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    async fn ensure_parent_dir(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                info!("Creating data directory: {}", parent.display());
                fs::create_dir_all(parent)
                    .await
                    .map_err(StoreError::unavailable)?;
            }
        }
        Ok(())
    }

    fn parse_line(line: &str) -> Option<Record> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let parts: Vec<&str> = line.split('|').map(str::trim).collect();
        if parts.len() < 3 {
            // Lenient read: malformed lines are dropped, not surfaced
            debug!("Dropping malformed text line: {:?}", line);
            return None;
        }
        Some(Record {
            id: None,
            name: parts[0].to_string(),
            email: parts[1].to_string(),
            timestamp: parts[2].to_string(),
        })
    }
}

#[async_trait]
impl RecordStore for TextLineStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        self.ensure_parent_dir().await?;
        if !self.path.exists() {
            info!("Creating text log: {}", self.path.display());
            fs::write(&self.path, b"")
                .await
                .map_err(StoreError::unavailable)?;
        }
        Ok(())
    }

    async fn append(&self, name: &str, email: &str) -> Result<Record, StoreError> {
        let _guard = self.write_lock.lock().await;

        let record = Record::new(name, email);
        let line = format!("{} | {} | {}\n", record.name, record.email, record.timestamp);

        let mut file = fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .await
            .map_err(StoreError::write)?;

        file.write_all(line.as_bytes())
            .await
            .map_err(StoreError::write)?;
        file.flush().await.map_err(StoreError::write)?;

        debug!("Appended text record to {}", self.path.display());
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<Record>, StoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(_) => return Ok(Vec::new()),
        };

        Ok(content.lines().filter_map(Self::parse_line).collect())
    }

    fn columns(&self) -> &'static [&'static str] {
        FILE_COLUMNS
    }

    fn store_kind(&self) -> &str {
        "txt"
    }
}
