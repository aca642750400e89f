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

use form_recorder::config::{load_config, load_config_or_default};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_full_config() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
storage:
  data_dir: /tmp/form-recorder-test/datos
  db_dir: /tmp/form-recorder-test/database
server:
  bind_addr: "0.0.0.0:9090"
logging:
  level: debug
"#
    )
    .unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.storage.data_dir, "/tmp/form-recorder-test/datos");
    assert_eq!(config.server.bind_addr, "0.0.0.0:9090");
    assert_eq!(config.logging.level, "debug");
    // Unspecified file names keep their defaults
    assert_eq!(config.storage.text_file, "datos.txt");
    assert_eq!(config.storage.db_file, "usuarios.db");
}

#[test]
fn test_load_minimal_config_uses_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "storage: {{}}").unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.storage.data_dir, "datos");
    assert_eq!(config.storage.db_dir, "database");
    assert_eq!(config.server.bind_addr, "127.0.0.1:8080");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let config = load_config_or_default("/nonexistent/form-recorder.yaml").unwrap();
    assert_eq!(config.storage.data_dir, "datos");
}

#[test]
fn test_env_substitution_in_file() {
    std::env::set_var("FORM_RECORDER_TEST_DIR", "/srv/datos");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
storage:
  data_dir: ${{FORM_RECORDER_TEST_DIR}}
"#
    )
    .unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.storage.data_dir, "/srv/datos");

    std::env::remove_var("FORM_RECORDER_TEST_DIR");
}

#[test]
fn test_invalid_bind_addr_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
server:
  bind_addr: "not a socket address"
"#
    )
    .unwrap();

    let result = load_config(file.path());
    assert!(result.is_err());
}

#[test]
fn test_path_helpers_join_dirs() {
    let config = load_config_or_default("/nonexistent.yaml").unwrap();
    assert_eq!(
        config.storage.text_path(),
        std::path::PathBuf::from("datos/datos.txt")
    );
    assert_eq!(
        config.storage.db_path(),
        std::path::PathBuf::from("database/usuarios.db")
    );
}
