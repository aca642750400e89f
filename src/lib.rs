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

// Form submission recorder with multi-backend storage
//
// Accepts name/email submissions over HTTP and persists each one to a
// caller-selected backend:
// - append-only pipe-delimited text log
// - JSON array file (full rewrite per append, temp-file + rename)
// - header-row CSV table
// - SQLite table with auto-increment identity
//
// All four backends satisfy the same initialize/append/list_all
// contract; a selector token picks one per request.

pub mod config;
pub mod protocol;
pub mod record;
pub mod server;
pub mod store;

// Re-export main types
pub use config::{load_config, load_config_or_default, load_config_with_env, AppConfig};
pub use protocol::{LandingResponse, RecordsResponse, SaveQuery, SavedResponse, SubmitForm};
pub use record::{now_iso, Record};
pub use store::{
    CsvTableStore, JsonArrayStore, RecordStore, RelationalStore, Selector, StoreError, StoreSet,
    TextLineStore,
};
