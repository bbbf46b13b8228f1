//! File-backed wholesale persistence.
//!
//! Each store keeps its entire collection in one JSON file under a fixed
//! key: the collection is read whole at startup and rewritten whole on
//! every mutation. There are no migrations, no partial updates and no
//! schema version field; a record that parses is trusted as-is.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when writing a store file.
///
/// Read-side failures are deliberately absent: a missing or unparseable
/// file is treated as "no stored state" and the store falls back to its
/// built-in seed data.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// Collection could not be serialized.
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A wholesale JSON record for one collection under a fixed key.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a store for `key` under `data_dir`.
    ///
    /// The backing file is `<data_dir>/<key>.json`; nothing is touched
    /// until the first [`save`](Self::save).
    #[must_use]
    pub fn new(data_dir: &Path, key: &str) -> Self {
        Self {
            path: data_dir.join(format!("{key}.json")),
        }
    }

    /// Read the whole collection.
    ///
    /// Returns `None` when the file is absent or fails to read or parse.
    /// Corruption is logged and absorbed here, never surfaced: the caller
    /// falls back to its seed data.
    #[must_use]
    pub fn load<T: DeserializeOwned>(&self) -> Option<Vec<T>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read store file");
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(records) => Some(records),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "store file is corrupt, falling back to defaults"
                );
                None
            }
        }
    }

    /// Rewrite the whole collection.
    ///
    /// The new contents are written to a temporary file and renamed into
    /// place, so a crash mid-write leaves the previous record intact.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if serialization or any filesystem
    /// operation fails.
    pub fn save<T: Serialize>(&self, records: &[T]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_vec_pretty(records)?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, &contents)?;
        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), records = records.len(), "store persisted");
        Ok(())
    }
}
