//! Configuration for file-backed persistence
//!
//! Immutable once built; a backend reads it exactly once at construction.

use std::path::{Component, Path, PathBuf};

use crate::error::{PersistenceError, Result};

/// Default permissions for a freshly created base directory (Unix only)
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o755;

/// Configuration for one file-backed persistence instance
#[derive(Debug, Clone)]
pub struct FileConfig {
    // -------------------------------------------------------------------------
    // Storage Location
    // -------------------------------------------------------------------------
    /// Directory holding one file per record:
    ///   {base_dir}/
    ///     ├── {id}.{extension}
    ///     └── ...
    pub base_dir: PathBuf,

    /// Mode for directories created under `base_dir` (including parents)
    pub dir_permissions: u32,

    // -------------------------------------------------------------------------
    // File Naming
    // -------------------------------------------------------------------------
    /// File extension without dot; `None` uses the format's own
    pub extension: Option<String>,
}

impl FileConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            dir_permissions: DEFAULT_DIR_PERMISSIONS,
            extension: None,
        }
    }

    /// Config rooted at the process working directory
    pub fn current_dir() -> Result<Self> {
        let dir = std::env::current_dir().map_err(|e| {
            PersistenceError::runtime("Could not determine work directory").with_source(e)
        })?;
        Ok(Self::new(dir))
    }

    /// Create a new config builder
    pub fn builder(base_dir: impl Into<PathBuf>) -> FileConfigBuilder {
        FileConfigBuilder {
            config: Self::new(base_dir),
        }
    }
}

/// Builder for FileConfig
pub struct FileConfigBuilder {
    config: FileConfig,
}

impl FileConfigBuilder {
    /// Set the base directory
    pub fn base_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.base_dir = path.into();
        self
    }

    /// Set the permissions used when creating the base directory
    pub fn dir_permissions(mut self, mode: u32) -> Self {
        self.config.dir_permissions = mode;
        self
    }

    /// Override the file extension (leading dots are ignored)
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        let extension: String = extension.into();
        self.config.extension = Some(extension.trim_start_matches('.').to_string());
        self
    }

    pub fn build(self) -> FileConfig {
        self.config
    }
}

/// Drop trailing separators and reject empty or root directories.
pub(crate) fn normalize_base_dir(path: &Path) -> Result<PathBuf> {
    let normalized: PathBuf = path.components().collect();

    let is_root = normalized
        .components()
        .all(|c| matches!(c, Component::RootDir | Component::Prefix(_)));

    if normalized.as_os_str().is_empty() || is_root {
        return Err(PersistenceError::invalid(
            "Invalid directory name, must not be empty or root /",
        ));
    }

    Ok(normalized)
}
