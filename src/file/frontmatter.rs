//! FrontmatterFilePersistence - YAML header blocks in front of record files.
//!
//! ```text
//! ---
//! title: Release notes
//! draft: false
//! ---
//!
//! <body encoded by the inner persistence>
//! ```
//!
//! Writes prepend the configured frontmatter; reads strip and remember it,
//! then hand the trimmed body to the inner persistence's decoder.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::format::{decode_yaml, encode_yaml};
use super::{records, FileBackend};
use crate::error::{PersistenceError, Result};
use crate::persistence::Persistence;
use crate::record::{Id, Record};

const DELIMITER: &str = "---";

/// Decorates a file backend with a frontmatter header.
pub struct FrontmatterFilePersistence<P> {
    inner: P,
    frontmatter: RwLock<Record>,
}

impl<P: FileBackend> FrontmatterFilePersistence<P> {
    pub fn new(inner: P) -> Self {
        Self::with_frontmatter(inner, Record::new())
    }

    pub fn with_frontmatter(inner: P, frontmatter: Record) -> Self {
        FrontmatterFilePersistence {
            inner,
            frontmatter: RwLock::new(frontmatter),
        }
    }

    /// Access the inner persistence.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn into_inner(self) -> P {
        self.inner
    }

    /// Frontmatter written with the next file, or parsed from the last one read.
    pub fn frontmatter(&self) -> Result<Record> {
        self.frontmatter
            .read()
            .map(|fm| fm.clone())
            .map_err(|_| PersistenceError::runtime("frontmatter lock poisoned"))
    }

    pub fn set_frontmatter(&self, frontmatter: Record) -> Result<()> {
        let mut slot = self
            .frontmatter
            .write()
            .map_err(|_| PersistenceError::runtime("frontmatter lock poisoned"))?;
        *slot = frontmatter;
        Ok(())
    }

    /// Read a record together with the frontmatter of its file.
    pub fn read_with_frontmatter(&self, id: &Id) -> Result<(Record, Record)> {
        let record = records::read(self, id)?;
        Ok((record, self.frontmatter()?))
    }

    /// Write `body` with the configured frontmatter, `overrides` taking precedence.
    pub fn write_with_overrides(&self, path: &Path, body: &str, overrides: &Record) -> Result<()> {
        let mut matter = self.frontmatter()?;
        matter.merge(overrides);
        let content = render(&matter, body)?;
        self.inner.write_to_file(path, &content)
    }
}

/// Render `---\n<yaml>\n---\n\n<body>`.
fn render(matter: &Record, body: &str) -> Result<String> {
    let yaml = encode_yaml(matter)?;
    Ok(format!(
        "{delim}\n{yaml}\n{delim}\n\n{body}",
        delim = DELIMITER,
        yaml = yaml.trim_end(),
        body = body
    ))
}

/// Split content into its frontmatter mapping and trimmed body.
///
/// Content that does not open with a closed `---` block has no frontmatter.
fn split(content: &str) -> Result<(Record, String)> {
    let mut lines = content.split_inclusive('\n');

    let mut consumed = match lines.next() {
        Some(first) if first.trim_end() == DELIMITER => first.len(),
        _ => return Ok((Record::new(), content.trim().to_string())),
    };

    let mut header = String::new();
    for line in lines {
        consumed += line.len();
        if line.trim_end() == DELIMITER {
            let matter = if header.trim().is_empty() {
                Record::new()
            } else {
                decode_yaml(&header)?
            };
            return Ok((matter, content[consumed..].trim().to_string()));
        }
        header.push_str(line);
    }

    Ok((Record::new(), content.trim().to_string()))
}

impl<P: FileBackend> FileBackend for FrontmatterFilePersistence<P> {
    fn extension(&self) -> &str {
        self.inner.extension()
    }

    fn base_dir(&self) -> &Path {
        self.inner.base_dir()
    }

    fn file_path(&self, id: &Id) -> Result<PathBuf> {
        self.inner.file_path(id)
    }

    /// Returns the trimmed body and stores the parsed frontmatter.
    fn read_from_file(&self, path: &Path) -> Result<String> {
        let content = self.inner.read_from_file(path)?;
        let (matter, body) = split(&content)?;
        self.set_frontmatter(matter)?;
        Ok(body)
    }

    fn write_to_file(&self, path: &Path, content: &str) -> Result<()> {
        self.write_with_overrides(path, content, &Record::new())
    }

    fn encode(&self, data: &Record) -> Result<String> {
        self.inner.encode(data)
    }

    fn decode(&self, content: &str) -> Result<Record> {
        self.inner.decode(content)
    }
}

impl<P: FileBackend> Persistence for FrontmatterFilePersistence<P> {
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
