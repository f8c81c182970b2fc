//! Records - the one shape every backend stores.
//!
//! A [`Record`] is an insertion-ordered map of field name to JSON value. Domain
//! structs cross the boundary through serde with [`to_record`] / [`from_record`].
//!
//! ## Example
//!
//! ```ignore
//! use repository_persistence::{to_record, Record};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Note {
//!     id: String,
//!     title: String,
//! }
//!
//! let record: Record = to_record(&Note { id: "n1".into(), title: "Hi".into() })?;
//! assert_eq!(record.id(), Some(&json!("n1")));
//! ```

mod id;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PersistenceError, Result};

pub use id::{generate_id, Id};

/// Name of the identifier field.
pub const ID_FIELD: &str = "id";

/// A field-name to value mapping representing one persisted entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Record(Map::new())
    }

    /// Wrap a JSON value. Anything other than an object is rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Record(map)),
            other => Err(PersistenceError::invalid(format!(
                "expected a mapping, got {}",
                type_name(&other)
            ))),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    /// The `id` field, unless absent or null.
    pub fn id(&self) -> Option<&Value> {
        self.0.get(ID_FIELD).filter(|v| !v.is_null())
    }

    /// The `id` field as an [`Id`]. Absent, null and non string/int ids are rejected.
    pub fn require_id(&self) -> Result<Id> {
        match self.id() {
            Some(value) => Id::from_value(value),
            None => Err(PersistenceError::invalid(
                "Element 'id' not of type string|int",
            )),
        }
    }

    pub fn set_id(&mut self, id: impl Into<Id>) {
        self.0.insert(ID_FIELD.to_string(), id.into().to_value());
    }

    /// Shallow merge: fields of `other` overwrite fields of `self`.
    pub fn merge(&mut self, other: &Record) {
        for (key, value) in other.iter() {
            self.0.insert(key.clone(), value.clone());
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Record(map)
    }
}

impl TryFrom<Value> for Record {
    type Error = PersistenceError;

    fn try_from(value: Value) -> Result<Self> {
        Record::from_value(value)
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Record(iter.into_iter().collect())
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Convert any serializable value into a record.
pub fn to_record<T: Serialize + ?Sized>(value: &T) -> Result<Record> {
    let value = serde_json::to_value(value).map_err(|e| {
        PersistenceError::invalid(format!("cannot convert entity into a record: {}", e))
            .with_source(e)
    })?;
    Record::from_value(value)
}

/// Convert a record into a domain type.
pub fn from_record<T: DeserializeOwned>(record: Record) -> Result<T> {
    serde_json::from_value(record.into_value()).map_err(|e| {
        PersistenceError::invalid(format!("cannot convert record into entity: {}", e))
            .with_source(e)
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
