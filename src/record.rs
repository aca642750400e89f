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

// Domain record shared by every storage backend

use chrono::Local;
use serde::{Deserialize, Serialize};

/// A single form submission as persisted by any backend.
///
/// `id` is assigned only by the relational backend; the file-backed
/// backends never populate it and it is omitted from their serialized
/// form. For the relational backend `timestamp` carries the
/// server-assigned `created_at` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub timestamp: String,
}

impl Record {
    /// Build a record with a core-assigned timestamp (local clock,
    /// ISO-8601 with second precision, no offset).
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            email: email.to_string(),
            timestamp: now_iso(),
        }
    }
}

/// Current local time formatted as `YYYY-MM-DDTHH:MM:SS`.
pub fn now_iso() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}
