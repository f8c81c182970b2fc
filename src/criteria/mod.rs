//! Exact-match record filtering.

use serde::Serialize;

use crate::record::{to_record, Record};

/// A predicate over records holding required field/value pairs.
///
/// A record is accepted when every criterion field is present (and not null)
/// with a strictly equal value. Empty criteria accept everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CriteriaCheck {
    criteria: Record,
}

impl CriteriaCheck {
    pub fn new(criteria: Record) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &Record {
        &self.criteria
    }

    pub fn accept(&self, record: &Record) -> bool {
        for (key, expected) in self.criteria.iter() {
            match record.get(key) {
                Some(actual) if !actual.is_null() && actual == expected => {}
                _ => return false,
            }
        }
        true
    }

    /// Accept an object-shaped entity by coercing it into a record first.
    /// Entities that do not serialize to a mapping are rejected.
    pub fn accept_entity<T: Serialize + ?Sized>(&self, entity: &T) -> bool {
        match to_record(entity) {
            Ok(record) => self.accept(&record),
            Err(_) => false,
        }
    }

    /// Borrow the check as a plain predicate closure.
    pub fn as_predicate(&self) -> impl Fn(&Record) -> bool + '_ {
        move |record| self.accept(record)
    }
}

impl From<Record> for CriteriaCheck {
    fn from(criteria: Record) -> Self {
        CriteriaCheck::new(criteria)
    }
}
