//! Repository and persistence building blocks.
//!
//! A [`Repository`] gives application code entity-level operations and
//! delegates storage to any [`Persistence`]: in memory, JSON or YAML files,
//! files with a YAML frontmatter header, a no-op sink, or a
//! [`PersistenceChain`] replicating across several of them.

mod criteria;
mod error;
mod file;
mod persistence;
mod record;
mod repository;

pub use criteria::CriteriaCheck;
pub use error::{BoxError, PersistenceError, Result};
pub use file::{
    FileBackend, FileConfig, FileConfigBuilder, FileFormat, FilePersistence,
    FrontmatterFilePersistence, JsonFilePersistence, JsonFormat, YamlFilePersistence, YamlFormat,
    DEFAULT_DIR_PERMISSIONS,
};
pub use persistence::{
    InMemoryPersistence, NoPersistence, Persistence, PersistenceChain, PersistenceDecorator,
    PersistenceExt,
};
pub use record::{from_record, generate_id, to_record, Id, Record, ID_FIELD};
pub use repository::{
    CollectionFactory, EntityItems, FindOptions, ItemFactory, RecordItems, Repository, SortOrder,
    VecCollection,
};
