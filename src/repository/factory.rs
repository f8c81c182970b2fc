use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;
use crate::record::{from_record, Record};

/// Turns stored records into the items a repository hands out.
pub trait ItemFactory: Send + Sync {
    type Item: Serialize;

    fn make_item(&self, record: Record) -> Result<Self::Item>;
}

/// Wraps the items of `find_all` into a collection.
pub trait CollectionFactory<T>: Send + Sync {
    type Collection: IntoIterator<Item = T>;

    fn make_collection(&self, items: Vec<T>) -> Self::Collection;
}

/// Identity item factory: records are the items.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordItems;

impl ItemFactory for RecordItems {
    type Item = Record;

    fn make_item(&self, record: Record) -> Result<Record> {
        Ok(record)
    }
}

/// Maps records into a domain type through serde.
pub struct EntityItems<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> EntityItems<T> {
    pub fn new() -> Self {
        EntityItems {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for EntityItems<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ItemFactory for EntityItems<T>
where
    T: Serialize + DeserializeOwned,
{
    type Item = T;

    fn make_item(&self, record: Record) -> Result<T> {
        from_record(record)
    }
}

/// Identity collection factory: items stay a `Vec`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VecCollection;

impl<T> CollectionFactory<T> for VecCollection {
    type Collection = Vec<T>;

    fn make_collection(&self, items: Vec<T>) -> Vec<T> {
        items
    }
}
