//! Key-value storage and the range persistence adapter.
//!
//! The editor persists everything through a tiny string key → string value
//! interface modelled on browser local storage ([`Storage`]). Two backends
//! are provided:
//!
//! - [`MemoryStorage`]: in-process map with an optional byte quota
//! - [`FileStorage`]: one file per key inside a directory, written atomically
//!
//! [`RangePersistence`] sits on top and stores the whole
//! [`RangeCollection`](crate::ranges::RangeCollection) as a single JSON blob.

mod file;
mod memory;
mod persistence;

use std::path::PathBuf;
use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use persistence::{RangePersistence, StoredRanges};

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing the value would exceed the backend's capacity.
    #[error("Storage quota exceeded writing '{key}' ({needed} bytes, quota {quota})")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Bytes in use after the write.
        needed: usize,
        /// Capacity in bytes.
        quota: usize,
    },

    /// The backend is switched off or otherwise not usable.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Value could not be encoded for storage.
    #[error("Failed to serialize value: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File I/O error.
    #[error("Failed to {operation} {}", .path.display())]
    Io {
        /// What was being done.
        operation: &'static str,
        /// File involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// String key → string value store.
pub trait Storage {
    /// Read the value under `key`; `Ok(None)` when nothing is stored.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value under `key`. Removing a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}
