//! Shared helpers: log capture, record literals and temp-dir backends.

#![allow(dead_code)]

use repository_persistence::{JsonFilePersistence, Record, YamlFilePersistence};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// Route library logs through the test harness. Set `RUST_LOG=debug` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn record(value: Value) -> Record {
    Record::from_value(value).unwrap()
}

pub fn json_store() -> (TempDir, JsonFilePersistence) {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();
    let store = JsonFilePersistence::new(temp_dir.path()).unwrap();
    (temp_dir, store)
}

pub fn yaml_store() -> (TempDir, YamlFilePersistence) {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();
    let store = YamlFilePersistence::new(temp_dir.path()).unwrap();
    (temp_dir, store)
}

/// Test domain: a catalogued book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub author: String,
    pub year: i64,
}

impl Book {
    pub fn new(title: &str, author: &str, year: i64) -> Self {
        Book {
            id: None,
            title: title.into(),
            author: author.into(),
            year,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.into());
        self
    }
}
