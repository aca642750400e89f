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

// SQLite backend implementation

use super::backend::{RecordStore, StoreError, RELATIONAL_COLUMNS};
use crate::record::Record;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

const CREATE_TABLE_SQL: &str = "
CREATE TABLE IF NOT EXISTS submissions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(100) NOT NULL,
    email VARCHAR(120) NOT NULL,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
)";

/// SQLite backend: auto-increment identity, server-assigned UTC
/// `created_at`, and newest-first reads.
///
/// Unlike the file backends the timestamp here comes from SQLite's
/// clock (`CURRENT_TIMESTAMP`, UTC) rather than the core's local clock;
/// that divergence is deliberate, as is the `ORDER BY id DESC` read
/// ordering.
pub struct RelationalStore {
    conn: Mutex<Connection>,
}

impl RelationalStore {
    /// Open (or create) the database file, creating its directory first.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                info!("Creating database directory: {}", parent.display());
                std::fs::create_dir_all(parent).map_err(StoreError::unavailable)?;
            }
        }
        let conn = Connection::open(path).map_err(StoreError::unavailable)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(StoreError::unavailable)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock_conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::write("connection mutex poisoned"))
    }
}

#[async_trait]
impl RecordStore for RelationalStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        let conn = self.lock_conn()?;
        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(StoreError::unavailable)?;
        Ok(())
    }

    async fn append(&self, name: &str, email: &str) -> Result<Record, StoreError> {
        let conn = self.lock_conn()?;

        // Single transaction: either the full row is visible after
        // commit, or nothing is (rollback on drop).
        let tx = conn.unchecked_transaction().map_err(StoreError::write)?;
        tx.execute(
            "INSERT INTO submissions (name, email) VALUES (?1, ?2)",
            params![name, email],
        )
        .map_err(StoreError::write)?;
        let id = tx.last_insert_rowid();
        let created_at: String = tx
            .query_row(
                "SELECT created_at FROM submissions WHERE id = ?1",
                [id],
                |row| row.get(0),
            )
            .map_err(StoreError::write)?;
        tx.commit().map_err(StoreError::write)?;

        debug!("Inserted submission id={}", id);
        Ok(Record {
            id: Some(id),
            name: name.to_string(),
            email: email.to_string(),
            timestamp: created_at,
        })
    }

    async fn list_all(&self) -> Result<Vec<Record>, StoreError> {
        let conn = self.lock_conn()?;

        let mut stmt = conn
            .prepare("SELECT id, name, email, created_at FROM submissions ORDER BY id DESC")
            .map_err(StoreError::unavailable)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Record {
                    id: Some(row.get(0)?),
                    name: row.get(1)?,
                    email: row.get(2)?,
                    timestamp: row.get(3)?,
                })
            })
            .map_err(StoreError::unavailable)?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::unavailable)
    }

    fn columns(&self) -> &'static [&'static str] {
        RELATIONAL_COLUMNS
    }

    fn store_kind(&self) -> &str {
        "db"
    }
}
