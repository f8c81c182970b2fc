//! Encoders/decoders for record files.

use serde_json::Value;

use crate::error::{PersistenceError, Result};
use crate::record::Record;

/// A text format one record file is written in.
pub trait FileFormat: Send + Sync {
    /// Extension without dot, e.g. `json`.
    fn extension(&self) -> &str;

    fn encode(&self, data: &Record) -> Result<String>;

    /// Decode file content. Anything that is not a mapping is rejected.
    fn decode(&self, content: &str) -> Result<Record>;
}

/// Pretty-printed JSON objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl JsonFormat {
    /// True if `content` is syntactically valid JSON of any shape.
    pub fn validate(content: &str) -> bool {
        serde_json::from_str::<serde::de::IgnoredAny>(content).is_ok()
    }
}

impl FileFormat for JsonFormat {
    fn extension(&self) -> &str {
        "json"
    }

    fn encode(&self, data: &Record) -> Result<String> {
        serde_json::to_string_pretty(data).map_err(|e| {
            PersistenceError::runtime(format!("Failed encoding record to JSON: {}", e))
                .with_source(e)
        })
    }

    fn decode(&self, content: &str) -> Result<Record> {
        let value: Value = serde_json::from_str(content).map_err(|e| {
            PersistenceError::runtime(format!("Failed decoding JSON string: {}", e)).with_source(e)
        })?;

        match value {
            Value::Object(map) => Ok(Record::from(map)),
            _ => Err(PersistenceError::invalid(
                "Decoding JSON did not yield a mapping.",
            )),
        }
    }
}

/// YAML block mappings.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormat;

impl FileFormat for YamlFormat {
    fn extension(&self) -> &str {
        "yaml"
    }

    fn encode(&self, data: &Record) -> Result<String> {
        encode_yaml(data)
    }

    fn decode(&self, content: &str) -> Result<Record> {
        decode_yaml(content)
    }
}

pub(crate) fn encode_yaml(data: &Record) -> Result<String> {
    serde_yaml::to_string(data).map_err(|e| {
        PersistenceError::invalid(format!("Failed encoding record to YAML: {}", e)).with_source(e)
    })
}

pub(crate) fn decode_yaml(content: &str) -> Result<Record> {
    let value: Value = serde_yaml::from_str(content).map_err(|e| {
        PersistenceError::invalid(format!("Failed decoding YAML string: {}", e)).with_source(e)
    })?;

    match value {
        Value::Object(map) => Ok(Record::from(map)),
        _ => Err(PersistenceError::invalid(
            "Decoded YAML did not yield a mapping.",
        )),
    }
}
