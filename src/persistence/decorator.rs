use super::Persistence;
use crate::error::Result;
use crate::record::{Id, Record};

/// Wraps an inner persistence and forwards every operation unmodified.
///
/// Specialized decorators hold their inner backend the same way and override
/// only what they change.
pub struct PersistenceDecorator<P> {
    inner: P,
}

impl<P> PersistenceDecorator<P> {
    pub fn new(inner: P) -> Self {
        PersistenceDecorator { inner }
    }

    /// Access the inner persistence.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: Persistence> Persistence for PersistenceDecorator<P> {
    fn create(&self, data: Record) -> Result<Id> {
        self.inner.create(data)
    }

    fn read(&self, id: &Id) -> Result<Record> {
        self.inner.read(id)
    }

    fn read_all(&self) -> Result<Vec<Record>> {
        self.inner.read_all()
    }

    fn update(&self, data: Record) -> Result<u64> {
        self.inner.update(data)
    }

    fn delete(&self, id: &Id) -> Result<u64> {
        self.inner.delete(id)
    }
}
