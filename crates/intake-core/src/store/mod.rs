//! Record store: the full patient collection kept in one storage slot.
//!
//! The collection is read and written as a whole. Reads of an absent slot
//! yield an empty collection; content that does not parse is reported as
//! [`StoreError::CorruptData`] and left in place until [`RecordStore::reset`]
//! is called.

mod storage;

pub use storage::*;

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::DEFAULT_STORAGE_KEY;
use crate::db::DbError;
use crate::models::PatientRecord;

/// Record store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Corrupt data in storage slot '{key}': {source}")]
    CorruptData {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Patient collection bound to a single storage slot.
pub struct RecordStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> RecordStore<S> {
    /// Bind to the default slot.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Bind to a named slot.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Slot key this store reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the full collection.
    pub fn load(&self) -> StoreResult<Vec<PatientRecord>> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            debug!(key = %self.key, "storage slot empty");
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw).map_err(|source| {
            warn!(key = %self.key, error = %source, "storage slot holds corrupt data");
            StoreError::CorruptData {
                key: self.key.clone(),
                source,
            }
        })
    }

    /// Overwrite the slot with `records`.
    pub fn save(&mut self, records: &[PatientRecord]) -> StoreResult<()> {
        let raw = serde_json::to_string(records)?;
        self.storage.set_item(&self.key, &raw)?;
        debug!(key = %self.key, count = records.len(), "saved patient records");
        Ok(())
    }

    /// Remove the slot; the next load is empty.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.storage.remove_item(&self.key)?;
        debug!(key = %self.key, "cleared storage slot");
        Ok(())
    }

    /// Replace whatever the slot holds, corrupt or not, with an empty collection.
    pub fn reset(&mut self) -> StoreResult<()> {
        warn!(key = %self.key, "resetting storage slot");
        self.save(&[])
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}
