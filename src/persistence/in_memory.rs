//! InMemoryPersistence - map-backed persistence for testing and mocking.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use super::Persistence;
use crate::error::{PersistenceError, Result};
use crate::record::{Id, Record, ID_FIELD};

/// In-memory persistence backed by a map from stringified id to record.
///
/// Clone-friendly via Arc: clones share the same records.
#[derive(Clone)]
pub struct InMemoryPersistence {
    storage: Arc<RwLock<BTreeMap<String, Record>>>,
}

impl Default for InMemoryPersistence {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPersistence {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Create a store seeded with records.
    pub fn with_records<I, K>(records: I) -> Self
    where
        I: IntoIterator<Item = (K, Record)>,
        K: Into<Id>,
    {
        let storage = records
            .into_iter()
            .map(|(id, record)| (id.into().to_string(), record))
            .collect();
        Self {
            storage: Arc::new(RwLock::new(storage)),
        }
    }

    /// Snapshot of every stored record keyed by stringified id.
    pub fn records(&self) -> Result<BTreeMap<String, Record>> {
        let storage = self
            .storage
            .read()
            .map_err(|_| PersistenceError::runtime("in-memory store lock poisoned"))?;
        Ok(storage.clone())
    }

    pub fn len(&self) -> Result<usize> {
        let storage = self
            .storage
            .read()
            .map_err(|_| PersistenceError::runtime("in-memory store lock poisoned"))?;
        Ok(storage.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl Persistence for InMemoryPersistence {
    /// The record is stored as given; a generated id is not written into it.
    fn create(&self, data: Record) -> Result<Id> {
        let id = match data.get(ID_FIELD) {
            Some(value) => Id::from_value(value)?,
            None => Id::Str(Uuid::new_v4().simple().to_string()),
        };

        let mut storage = self
            .storage
            .write()
            .map_err(|_| PersistenceError::runtime("in-memory store lock poisoned"))?;
        storage.insert(id.to_string(), data);

        Ok(id)
    }

    fn read(&self, id: &Id) -> Result<Record> {
        let storage = self
            .storage
            .read()
            .map_err(|_| PersistenceError::runtime("in-memory store lock poisoned"))?;

        storage.get(&id.to_string()).cloned().ok_or_else(|| {
            PersistenceError::not_found(format!("Failed to find record with ID '{}'.", id))
        })
    }

    fn read_all(&self) -> Result<Vec<Record>> {
        let storage = self
            .storage
            .read()
            .map_err(|_| PersistenceError::runtime("in-memory store lock poisoned"))?;
        Ok(storage.values().cloned().collect())
    }

    /// Upsert: the slot is written whether or not it existed before.
    fn update(&self, data: Record) -> Result<u64> {
        let id = data.require_id()?;

        let mut storage = self
            .storage
            .write()
            .map_err(|_| PersistenceError::runtime("in-memory store lock poisoned"))?;
        storage.insert(id.to_string(), data);

        Ok(1)
    }

    fn delete(&self, id: &Id) -> Result<u64> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| PersistenceError::runtime("in-memory store lock poisoned"))?;

        Ok(match storage.remove(&id.to_string()) {
            Some(_) => 1,
            None => 0,
        })
    }
}
