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

// Storage backend module
//
// Provides a trait-based abstraction over the four interchangeable
// persistence backends (text log, JSON array, CSV table, SQLite) and
// the dispatcher that selects one per request from a selector token.

pub mod backend;
pub mod csv_table;
pub mod dispatcher;
pub mod json_array;
pub mod relational;
pub mod text_line;

pub use backend::{RecordStore, StoreError, FILE_COLUMNS, RELATIONAL_COLUMNS};
pub use csv_table::CsvTableStore;
pub use dispatcher::{Selector, StoreSet};
pub use json_array::JsonArrayStore;
pub use relational::RelationalStore;
pub use text_line::TextLineStore;
