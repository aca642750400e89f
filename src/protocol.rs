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

use crate::record::Record;
use serde::{Deserialize, Serialize};

/// Form payload for the write path.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_backend")]
    pub backend: String,
}

fn default_backend() -> String {
    "txt".to_string()
}

/// Optional query parameters for the direct save endpoints; absent
/// fields fall back to the per-backend defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveQuery {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Landing view payload.
#[derive(Debug, Clone, Serialize)]
pub struct LandingResponse {
    pub message: String,
    pub backends: Vec<&'static str>,
}

/// Response for a successful direct save.
#[derive(Debug, Clone, Serialize)]
pub struct SavedResponse {
    pub message: String,
    pub record: Record,
}

/// Read view: the backend's accumulated records plus the column set
/// describing its schema.
#[derive(Debug, Clone, Serialize)]
pub struct RecordsResponse {
    pub message: String,
    pub columns: Vec<&'static str>,
    pub records: Vec<Record>,
}

/// Error body for failed writes/reads.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
