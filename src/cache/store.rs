//! Cache store for persisting server records to disk
//!
//! Provides a `CacheStore` holding one `ServerRecord` per cache key, backed by
//! a single JSON document that is fully rewritten after every successful fetch,
//! supporting graceful degradation when the monitoring service is unavailable.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::data::ServerRecord;

/// Errors that can occur when persisting the cache document
///
/// Load failures are deliberately not represented here: a missing or
/// unparsable document loads as an empty store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document could not be serialized
    #[error("failed to serialize cache document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Serialization produced no output; the on-disk document is left untouched
    #[error("serialized cache document was empty; existing file preserved")]
    EmptyDocument,

    /// The document could not be written or moved into place
    #[error("failed to write cache document: {0}")]
    Io(#[from] std::io::Error),
}

/// Manages the in-memory record map and its persisted JSON document
///
/// The whole map is serialized and atomically replaced on every `put`; a
/// failed write never truncates or corrupts the existing document. Records
/// are never evicted, so staleness is advisory and decided by the caller.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Path of the persisted cache document
    path: PathBuf,
    /// In-memory view of the persisted document
    records: BTreeMap<String, ServerRecord>,
}

impl CacheStore {
    /// Loads the store from `path`.
    ///
    /// A missing, unreadable, or unparsable document yields an empty store;
    /// load never fails. This is a documented contract, not a fallback: the
    /// cache is an optimization and its absence must not stop a query.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();

        Self { path, records }
    }

    /// Returns the path of the persisted document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Looks up the record for `key`
    pub fn get(&self, key: &str) -> Option<&ServerRecord> {
        self.records.get(key)
    }

    /// Inserts or overwrites the record for `key`, then rewrites the document.
    ///
    /// The entire map is serialized to a temporary file next to the document
    /// and renamed into place, so a failed write leaves the previous document
    /// intact. If serialization fails or yields empty output the write is
    /// skipped entirely. The in-memory record is kept either way; callers
    /// treat a returned error as non-fatal.
    pub fn put(&mut self, key: &str, record: ServerRecord) -> Result<(), StoreError> {
        self.records.insert(key.to_string(), record);
        self.persist()
    }

    /// Serializes the map and atomically replaces the on-disk document
    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.records)?;
        if json.is_empty() {
            return Err(StoreError::EmptyDocument);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
