//! CRUD over any [`FileBackend`].

use std::fs;

use tracing::debug;

use super::FileBackend;
use crate::error::{PersistenceError, Result};
use crate::record::{generate_id, Id, Record, ID_FIELD};

/// Write `data` to a new file. Without an `id` field a random one is
/// generated and stored in the record.
pub(crate) fn create<B: FileBackend + ?Sized>(backend: &B, mut data: Record) -> Result<Id> {
    let id = match data.get(ID_FIELD) {
        Some(value) => Id::from_value(value)?,
        None => {
            let id = Id::Str(generate_id());
            data.set_id(id.clone());
            id
        }
    };

    let path = backend.file_path(&id)?;
    let content = backend.encode(&data)?;
    backend.write_to_file(&path, &content)?;

    Ok(id)
}

pub(crate) fn read<B: FileBackend + ?Sized>(backend: &B, id: &Id) -> Result<Record> {
    let path = backend.file_path(id)?;

    backend
        .read_from_file(&path)
        .and_then(|content| backend.decode(&content))
        .map_err(|e| {
            if e.is_not_found() {
                PersistenceError::not_found(format!(
                    "File for ID '{}' not found: {}",
                    id,
                    path.display()
                ))
                .with_source(e)
            } else {
                PersistenceError::runtime(format!(
                    "Caught exception for ID '{}' (file {})",
                    id,
                    path.display()
                ))
                .with_source(e)
            }
        })
}

/// Read every file with the backend's extension, in filename order.
/// Records that decode to an empty mapping are skipped, as are files whose
/// name is not valid UTF-8 or does not map back to an id.
pub(crate) fn read_all<B: FileBackend + ?Sized>(backend: &B) -> Result<Vec<Record>> {
    let suffix = format!(".{}", backend.extension());
    let entries = fs::read_dir(backend.base_dir()).map_err(|e| {
        PersistenceError::runtime(format!(
            "Failed listing directory {}",
            backend.base_dir().display()
        ))
        .with_source(e)
    })?;

    let mut stems = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            PersistenceError::runtime("Failed listing directory entry").with_source(e)
        })?;
        if !entry.path().is_file() {
            continue;
        }

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            debug!(name = ?file_name, "skipping non UTF-8 file name");
            continue;
        };
        if let Some(stem) = name.strip_suffix(&suffix) {
            stems.push(stem.to_string());
        }
    }
    stems.sort();

    let mut records = Vec::with_capacity(stems.len());
    for stem in stems {
        let id = id_from_stem(&stem);
        if backend.file_path(&id).is_err() {
            debug!(%stem, "skipping file that does not name a record");
            continue;
        }
        let record = read(backend, &id)?;
        if !record.is_empty() {
            records.push(record);
        }
    }

    Ok(records)
}

/// Integer ids are written as their decimal form, so canonical integer stems
/// read back as integers.
fn id_from_stem(stem: &str) -> Id {
    match stem.parse::<i64>() {
        Ok(n) if n.to_string() == stem => Id::Int(n),
        _ => Id::Str(stem.to_string()),
    }
}

/// Overwrite an existing file. Never creates one.
pub(crate) fn update<B: FileBackend + ?Sized>(backend: &B, data: Record) -> Result<u64> {
    let id = data.require_id()?;

    let path = backend.file_path(&id)?;
    if !path.exists() {
        return Err(PersistenceError::invalid(format!(
            "File {} not found for ID '{}'",
            path.display(),
            id
        )));
    }

    let content = backend.encode(&data)?;
    backend.write_to_file(&path, &content)?;

    Ok(1)
}

pub(crate) fn delete<B: FileBackend + ?Sized>(backend: &B, id: &Id) -> Result<u64> {
    let path = backend.file_path(id)?;
    if !path.exists() {
        return Ok(0);
    }

    fs::remove_file(&path).map_err(|e| {
        PersistenceError::runtime(format!(
            "Failed deleting file {} for ID '{}'",
            path.display(),
            id
        ))
        .with_source(e)
    })?;
    debug!(path = %path.display(), %id, "deleted record file");

    Ok(1)
}
