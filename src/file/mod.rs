//! File-backed persistence: one file per record.
//!
//! ## Layout
//!
//! ```text
//! {base_dir}/
//!   ├── 4f9kQ2mXa1.json
//!   ├── 17.json
//!   └── note-1.json
//! ```
//!
//! The filename stem is the record id; nothing is nested below `base_dir`.
//! [`JsonFilePersistence`] and [`YamlFilePersistence`] differ only in their
//! [`FileFormat`]. [`FrontmatterFilePersistence`] wraps either one and adds a
//! YAML header block to every file.

mod config;
mod format;
mod frontmatter;
mod records;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{PersistenceError, Result};
use crate::persistence::Persistence;
use crate::record::{Id, Record};

pub use config::{FileConfig, FileConfigBuilder, DEFAULT_DIR_PERMISSIONS};
pub use format::{FileFormat, JsonFormat, YamlFormat};
pub use frontmatter::FrontmatterFilePersistence;

/// File persistence writing pretty-printed JSON.
pub type JsonFilePersistence = FilePersistence<JsonFormat>;

/// File persistence writing YAML.
pub type YamlFilePersistence = FilePersistence<YamlFormat>;

/// A persistence whose records live in files under a base directory.
///
/// The CRUD operations of every file backend run on top of these primitives,
/// so a decorator that overrides `read_from_file`/`write_to_file` changes what
/// `create`, `read`, `update` and friends put on disk.
pub trait FileBackend: Persistence {
    /// Extension without dot.
    fn extension(&self) -> &str;

    fn base_dir(&self) -> &Path;

    /// `{base_dir}/{id}.{extension}`. Blank ids and ids that would leave or
    /// nest below `base_dir` are rejected.
    fn file_path(&self, id: &Id) -> Result<PathBuf> {
        if id.is_blank() {
            return Err(PersistenceError::invalid("ID must not be empty"));
        }

        let stem = id.to_string();
        if stem == "." || stem == ".." || stem.contains(['/', '\\', '\0']) {
            return Err(PersistenceError::invalid(format!(
                "ID '{}' must not contain path separators",
                stem
            )));
        }

        Ok(self.base_dir().join(format!("{}.{}", stem, self.extension())))
    }

    /// Raw file content. A missing file is `NotFound`.
    fn read_from_file(&self, path: &Path) -> Result<String>;

    fn write_to_file(&self, path: &Path, content: &str) -> Result<()>;

    fn encode(&self, data: &Record) -> Result<String>;

    fn decode(&self, content: &str) -> Result<Record>;
}

/// File persistence parameterized by its on-disk format.
#[derive(Debug, Clone)]
pub struct FilePersistence<F> {
    base_dir: PathBuf,
    extension: String,
    format: F,
}

impl<F: FileFormat + Default> FilePersistence<F> {
    /// Store records under `base_dir`, creating it if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::with_config(FileConfig::new(base_dir))
    }

    pub fn with_config(config: FileConfig) -> Result<Self> {
        Self::with_format(config, F::default())
    }
}

impl<F: FileFormat> FilePersistence<F> {
    pub fn with_format(config: FileConfig, format: F) -> Result<Self> {
        let base_dir = config::normalize_base_dir(&config.base_dir)?;
        ensure_dir(&base_dir, config.dir_permissions)?;

        let extension = config
            .extension
            .unwrap_or_else(|| format.extension().to_string());

        Ok(Self {
            base_dir,
            extension,
            format,
        })
    }

    pub fn format(&self) -> &F {
        &self.format
    }
}

fn ensure_dir(path: &Path, mode: u32) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(path).map_err(|e| {
        PersistenceError::runtime(format!(
            "Could not create directory {}",
            path.display()
        ))
        .with_source(e)
    })?;
    debug!(path = %path.display(), "created base directory");
    Ok(())
}

impl<F: FileFormat> FileBackend for FilePersistence<F> {
    fn extension(&self) -> &str {
        &self.extension
    }

    fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn read_from_file(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                PersistenceError::not_found(format!("File not found: {}", path.display()))
                    .with_source(e)
            }
            _ => PersistenceError::runtime(format!("Failed reading file: {}", path.display()))
                .with_source(e),
        })
    }

    fn write_to_file(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|e| {
            PersistenceError::runtime(format!("Failed to write file: {}", path.display()))
                .with_source(e)
        })?;
        debug!(path = %path.display(), bytes = content.len(), "wrote record file");
        Ok(())
    }

    fn encode(&self, data: &Record) -> Result<String> {
        self.format.encode(data)
    }

    fn decode(&self, content: &str) -> Result<Record> {
        self.format.decode(content)
    }
}

impl<F: FileFormat> Persistence for FilePersistence<F> {
    fn create(&self, data: Record) -> Result<Id> {
        records::create(self, data)
    }

    fn read(&self, id: &Id) -> Result<Record> {
        records::read(self, id)
    }

    fn read_all(&self) -> Result<Vec<Record>> {
        records::read_all(self)
    }

    fn update(&self, data: Record) -> Result<u64> {
        records::update(self, data)
    }

    fn delete(&self, id: &Id) -> Result<u64> {
        records::delete(self, id)
    }
}
