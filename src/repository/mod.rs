//! Repository - entity-oriented access on top of a [`Persistence`](crate::Persistence).
//!
//! ## Example
//!
//! ```ignore
//! use repository_persistence::{FindOptions, JsonFilePersistence, PersistenceExt, SortOrder};
//!
//! let repo = JsonFilePersistence::new("data/books")?.repository();
//!
//! repo.save(&json!({"title": "Dune", "year": 1965}))?;
//!
//! let recent = repo.find_by(
//!     &criteria,
//!     &FindOptions::new().order_by("year", SortOrder::Desc).limit(10),
//! )?;
//! ```

mod factory;
mod options;
mod repository;

pub use factory::{CollectionFactory, EntityItems, ItemFactory, RecordItems, VecCollection};
pub use options::{FindOptions, SortOrder};
pub use repository::Repository;
