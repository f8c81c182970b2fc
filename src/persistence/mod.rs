//! Persistence - uniform CRUD over interchangeable storage backends.
//!
//! Every backend stores [`Record`]s keyed by [`Id`]. Backends compose: a
//! [`PersistenceChain`] fans writes out and falls back on reads, a
//! [`PersistenceDecorator`] wraps another backend and forwards to it.
//!
//! ## Example
//!
//! ```ignore
//! use repository_persistence::{InMemoryPersistence, Persistence, PersistenceChain};
//!
//! let primary = InMemoryPersistence::new();
//! let replica = InMemoryPersistence::new();
//! let chain = PersistenceChain::new(vec![Box::new(primary), Box::new(replica)]);
//!
//! let id = chain.create(record)?;
//! let loaded = chain.read(&id)?;
//! ```

mod chain;
mod decorator;
mod in_memory;
mod no_op;

use std::sync::Arc;

use crate::error::Result;
use crate::record::{Id, Record};
use crate::repository::Repository;

pub use chain::PersistenceChain;
pub use decorator::PersistenceDecorator;
pub use in_memory::InMemoryPersistence;
pub use no_op::NoPersistence;

/// CRUD contract shared by every storage backend.
pub trait Persistence: Send + Sync {
    /// Store a new record and return its identifier.
    fn create(&self, data: Record) -> Result<Id>;

    /// Load one record. Fails with `NotFound` when nothing is stored under `id`.
    fn read(&self, id: &Id) -> Result<Record>;

    /// Load every stored record.
    fn read_all(&self) -> Result<Vec<Record>>;

    /// Overwrite an existing record identified by its `id` field.
    /// Returns the number of affected records.
    fn update(&self, data: Record) -> Result<u64>;

    /// Remove a record. Returns the number of removed records; a missing record is 0.
    fn delete(&self, id: &Id) -> Result<u64>;
}

impl<P: Persistence + ?Sized> Persistence for Box<P> {
    fn create(&self, data: Record) -> Result<Id> {
        (**self).create(data)
    }

    fn read(&self, id: &Id) -> Result<Record> {
        (**self).read(id)
    }

    fn read_all(&self) -> Result<Vec<Record>> {
        (**self).read_all()
    }

    fn update(&self, data: Record) -> Result<u64> {
        (**self).update(data)
    }

    fn delete(&self, id: &Id) -> Result<u64> {
        (**self).delete(id)
    }
}

impl<P: Persistence + ?Sized> Persistence for Arc<P> {
    fn create(&self, data: Record) -> Result<Id> {
        (**self).create(data)
    }

    fn read(&self, id: &Id) -> Result<Record> {
        (**self).read(id)
    }

    fn read_all(&self) -> Result<Vec<Record>> {
        (**self).read_all()
    }

    fn update(&self, data: Record) -> Result<u64> {
        (**self).update(data)
    }

    fn delete(&self, id: &Id) -> Result<u64> {
        (**self).delete(id)
    }
}

/// Extension methods available on every sized backend.
pub trait PersistenceExt: Persistence + Sized {
    /// Wrap this backend in a record-level [`Repository`].
    fn repository(self) -> Repository<Self> {
        Repository::new(self)
    }

    /// Share this backend, e.g. between a chain and direct readers.
    fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl<P: Persistence> PersistenceExt for P {}
