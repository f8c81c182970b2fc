//! PersistenceChain - ordered fan-out/fallback over several backends.
//!
//! - `create`: every member, first successful id wins, fails only if all fail
//! - `read`: first member that does not miss
//! - `read_all`: first non-empty result set
//! - `update`: every member, affected counts summed
//! - `delete`: every member, positive counts summed, never fails
//!
//! Members run strictly in order on the calling thread.

use tracing::{debug, warn};

use super::Persistence;
use crate::error::{PersistenceError, Result};
use crate::record::{Id, Record};

/// Aggregates multiple persistence backends.
#[derive(Default)]
pub struct PersistenceChain {
    members: Vec<Box<dyn Persistence>>,
}

impl PersistenceChain {
    pub fn new(members: Vec<Box<dyn Persistence>>) -> Self {
        PersistenceChain { members }
    }

    /// Append a member at the end of the chain.
    pub fn push(&mut self, member: impl Persistence + 'static) -> &mut Self {
        self.members.push(Box::new(member));
        self
    }

    /// Builder-style variant of [`push`](Self::push).
    pub fn with(mut self, member: impl Persistence + 'static) -> Self {
        self.members.push(Box::new(member));
        self
    }

    /// Replace every member.
    pub fn replace(&mut self, members: Vec<Box<dyn Persistence>>) -> &mut Self {
        self.members = members;
        self
    }

    pub fn members(&self) -> &[Box<dyn Persistence>] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Persistence for PersistenceChain {
    fn create(&self, data: Record) -> Result<Id> {
        let mut first_id = None;
        let mut last_error = None;

        for (index, member) in self.members.iter().enumerate() {
            match member.create(data.clone()) {
                Ok(id) => {
                    if first_id.is_none() {
                        first_id = Some(id);
                    }
                }
                Err(err) => {
                    warn!(member = index, error = %err, "chain member failed to create record");
                    last_error = Some(err);
                }
            }
        }

        match first_id {
            Some(id) => Ok(id),
            None => {
                let err =
                    PersistenceError::runtime("All persistence mechanisms failed to create record.");
                Err(match last_error {
                    Some(cause) => err.with_source(cause),
                    None => err,
                })
            }
        }
    }

    fn read(&self, id: &Id) -> Result<Record> {
        for (index, member) in self.members.iter().enumerate() {
            match member.read(id) {
                Ok(record) => return Ok(record),
                Err(err) if err.is_not_found() => {
                    debug!(member = index, %id, "record not found in chain member");
                }
                Err(err) => return Err(err),
            }
        }

        Err(PersistenceError::not_found(format!(
            "Failed to find record with ID '{}' in chained persistence mechanisms.",
            id
        )))
    }

    fn read_all(&self) -> Result<Vec<Record>> {
        for member in &self.members {
            let records = member.read_all()?;
            if !records.is_empty() {
                return Ok(records);
            }
        }
        Ok(Vec::new())
    }

    fn update(&self, data: Record) -> Result<u64> {
        let mut total = 0;
        let mut last_error = None;

        for (index, member) in self.members.iter().enumerate() {
            match member.update(data.clone()) {
                Ok(affected) => total += affected,
                Err(err) => {
                    warn!(member = index, error = %err, "chain member failed to update record");
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(cause) if total == 0 => Err(PersistenceError::runtime(
                "All persistence mechanisms failed to update record.",
            )
            .with_source(cause)),
            _ => Ok(total),
        }
    }

    fn delete(&self, id: &Id) -> Result<u64> {
        let mut total = 0;

        for (index, member) in self.members.iter().enumerate() {
            match member.delete(id) {
                Ok(deleted) if deleted > 0 => total += deleted,
                Ok(_) => {}
                Err(err) => {
                    warn!(member = index, %id, error = %err, "chain member failed to delete record");
                }
            }
        }

        Ok(total)
    }
}
