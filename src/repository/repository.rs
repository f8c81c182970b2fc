use serde::Serialize;
use tracing::debug;

use super::factory::{CollectionFactory, ItemFactory, RecordItems, VecCollection};
use super::options::FindOptions;
use crate::criteria::CriteriaCheck;
use crate::error::Result;
use crate::persistence::Persistence;
use crate::record::{generate_id, to_record, Id, Record};

/// Entity-oriented facade over one [`Persistence`].
///
/// Items come out of the item factory (records by default), `find_all`
/// results out of the collection factory (a `Vec` by default).
pub struct Repository<P, I = RecordItems, C = VecCollection> {
    persistence: P,
    items: I,
    collections: C,
}

impl<P: Persistence> Repository<P> {
    pub fn new(persistence: P) -> Self {
        Repository {
            persistence,
            items: RecordItems,
            collections: VecCollection,
        }
    }
}

impl<P, I, C> Repository<P, I, C> {
    /// Swap the item factory, keeping persistence and collection factory.
    pub fn with_item_factory<J>(self, items: J) -> Repository<P, J, C> {
        Repository {
            persistence: self.persistence,
            items,
            collections: self.collections,
        }
    }

    pub fn with_collection_factory<D>(self, collections: D) -> Repository<P, I, D> {
        Repository {
            persistence: self.persistence,
            items: self.items,
            collections,
        }
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }
}

impl<P, I, C> Repository<P, I, C>
where
    P: Persistence,
    I: ItemFactory,
    C: CollectionFactory<I::Item>,
{
    /// A fresh random id, independent of the backend.
    pub fn next_id(&self) -> String {
        generate_id()
    }

    /// Load one item. `NotFound` from the backend is passed through.
    pub fn get(&self, id: &Id) -> Result<I::Item> {
        let record = self.persistence.read(id)?;
        self.items.make_item(record)
    }

    pub fn find_all(&self) -> Result<C::Collection> {
        let items = self
            .persistence
            .read_all()?
            .into_iter()
            .map(|record| self.items.make_item(record))
            .collect::<Result<Vec<_>>>()?;

        Ok(self.collections.make_collection(items))
    }

    /// Items whose fields equal every criterion, ordered and paged by `options`.
    pub fn find_by(&self, criteria: &Record, options: &FindOptions) -> Result<Vec<I::Item>> {
        let check = CriteriaCheck::new(criteria.clone());

        let mut matches = Vec::new();
        for item in self.find_all()? {
            let record = to_record(&item)?;
            if check.accept(&record) {
                matches.push((record, item));
            }
        }

        Ok(options.apply(matches))
    }

    pub fn find_one_by(&self, criteria: &Record) -> Result<Option<I::Item>> {
        let first = FindOptions::new().limit(1);
        Ok(self.find_by(criteria, &first)?.into_iter().next())
    }

    /// Create or update `entity`.
    ///
    /// Without an id a new one is assigned and the record created. With an id,
    /// an existing record is updated and a missing one created.
    pub fn save<T: Serialize + ?Sized>(&self, entity: &T) -> Result<bool> {
        let mut record = to_record(entity)?;

        let id = match record.id() {
            Some(value) => Id::from_value(value)?,
            None => {
                record.set_id(self.next_id());
                return self.create(record);
            }
        };

        match self.get(&id) {
            Ok(_) => {
                let affected = self.persistence.update(record)?;
                debug!(%id, affected, "updated entity");
                Ok(affected > 0)
            }
            Err(e) if e.is_not_found() => self.create(record),
            Err(e) => Err(e),
        }
    }

    /// Remove `entity` by its id. An entity without id deletes nothing.
    pub fn delete<T: Serialize + ?Sized>(&self, entity: &T) -> Result<bool> {
        let record = to_record(entity)?;
        let id = match record.id() {
            Some(value) => Id::from_value(value)?,
            None => return Ok(false),
        };

        Ok(self.persistence.delete(&id)? > 0)
    }

    /// Succeeds unless the backend hands back an empty or zero id.
    fn create(&self, record: Record) -> Result<bool> {
        let id = self.persistence.create(record)?;
        debug!(%id, "created entity");
        Ok(!id.is_blank() && id != Id::Int(0))
    }
}
