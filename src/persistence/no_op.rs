use uuid::Uuid;

use super::Persistence;
use crate::error::{PersistenceError, Result};
use crate::record::{Id, Record};

/// Persistence that stores nothing.
///
/// Creates hand back a fresh mock id, reads always miss, and updates/deletes
/// report success or failure according to `simulate_success`.
#[derive(Debug, Clone, Copy)]
pub struct NoPersistence {
    simulate_success: bool,
}

impl NoPersistence {
    pub fn new(simulate_success: bool) -> Self {
        Self { simulate_success }
    }

    pub fn simulates_success(&self) -> bool {
        self.simulate_success
    }

    fn affected(&self) -> u64 {
        if self.simulate_success {
            1
        } else {
            0
        }
    }
}

impl Default for NoPersistence {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Persistence for NoPersistence {
    fn create(&self, _data: Record) -> Result<Id> {
        Ok(Id::Str(format!("mockId_{}", Uuid::new_v4().simple())))
    }

    fn read(&self, id: &Id) -> Result<Record> {
        Err(PersistenceError::not_found(format!(
            "Intentionally no item stored for ID '{}'.",
            id
        )))
    }

    fn read_all(&self) -> Result<Vec<Record>> {
        Ok(Vec::new())
    }

    fn update(&self, _data: Record) -> Result<u64> {
        Ok(self.affected())
    }

    fn delete(&self, _id: &Id) -> Result<u64> {
        Ok(self.affected())
    }
}
