use std::fmt;

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PersistenceError, Result};

const GENERATED_ID_LEN: usize = 10;

/// Record identifier: a string or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Int(i64),
    Str(String),
}

impl Id {
    /// Read an identifier out of a JSON value. Only strings and integers qualify.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(Id::Str(s.clone())),
            Value::Number(n) => n
                .as_i64()
                .map(Id::Int)
                .ok_or_else(|| PersistenceError::invalid("Element 'id' not of type string|int")),
            _ => Err(PersistenceError::invalid(
                "Element 'id' not of type string|int",
            )),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Id::Int(n) => Value::from(*n),
            Id::Str(s) => Value::String(s.clone()),
        }
    }

    /// `""` and `"0"` cannot name a stored record.
    pub fn is_blank(&self) -> bool {
        matches!(self, Id::Str(s) if s.is_empty() || s == "0")
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Int(n) => write!(f, "{}", n),
            Id::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id::Str(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Id::Str(value)
    }
}

impl From<&String> for Id {
    fn from(value: &String) -> Self {
        Id::Str(value.clone())
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Id::Int(value)
    }
}

impl From<i32> for Id {
    fn from(value: i32) -> Self {
        Id::Int(value.into())
    }
}

impl From<u32> for Id {
    fn from(value: u32) -> Self {
        Id::Int(value.into())
    }
}

/// Random 10-character alphanumeric identifier.
pub fn generate_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_ID_LEN)
        .map(char::from)
        .collect()
}
