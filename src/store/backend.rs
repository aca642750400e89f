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

// Storage backend trait for form submissions

use crate::record::Record;
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by storage backends.
///
/// Read paths never produce errors for malformed content: unparseable
/// entries are dropped (or the whole resource treated as empty) and the
/// read continues. Only missing/uncreatable resources and failed writes
/// are surfaced.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("backing resource unavailable: {reason}")]
    ResourceUnavailable { reason: String },

    #[error("append failed: {reason}")]
    Write { reason: String },
}

impl StoreError {
    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        Self::ResourceUnavailable {
            reason: err.to_string(),
        }
    }

    pub fn write(err: impl std::fmt::Display) -> Self {
        Self::Write {
            reason: err.to_string(),
        }
    }
}

/// Generic storage backend trait for form submissions
///
/// This trait defines the uniform contract all four backends satisfy:
/// idempotent initialization, a durable append, and a full read of the
/// accumulated records. Ordering of `list_all` is backend-defined
/// (oldest-first for the file backends, newest-first for SQLite).
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Ensure the backing resource exists with correct structural
    /// framing (empty file, `[]`, header row, created table).
    ///
    /// Safe to call multiple times; a no-op when the resource is
    /// already in place.
    async fn initialize(&self) -> Result<(), StoreError>;

    /// Construct a record for `name`/`email`, durably write it, and
    /// return it (including any backend-assigned id/timestamp).
    async fn append(&self, name: &str, email: &str) -> Result<Record, StoreError>;

    /// Read every record from the backing resource.
    ///
    /// Re-invoking re-reads from scratch; the call never mutates the
    /// resource.
    async fn list_all(&self) -> Result<Vec<Record>, StoreError>;

    /// Column headers describing this backend's at-rest schema.
    fn columns(&self) -> &'static [&'static str];

    /// Get backend type identifier
    fn store_kind(&self) -> &str;
}

/// Header set shared by the three file-backed stores.
pub const FILE_COLUMNS: &[&str] = &["name", "email", "timestamp"];

/// Header set for the relational store.
pub const RELATIONAL_COLUMNS: &[&str] = &["id", "name", "email", "created_at"];
