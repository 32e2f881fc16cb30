//! In-memory storage backend.

use rustc_hash::FxHashMap;

use super::{Storage, StorageError};

/// Storage kept in a hash map.
///
/// An optional quota caps the total bytes of keys plus values, the way a
/// browser caps local storage. Storage can also be switched off entirely to
/// exercise the "storage disabled" path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: FxHashMap<String, String>,
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryStorage {
    /// Create unbounded storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage that rejects writes pushing usage over `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Default::default()
        }
    }

    /// Switch the backend off (every call fails) or back on.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Total bytes of keys and values currently stored.
    pub fn usage(&self) -> usize {
        self.items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    fn check_enabled(&self) -> Result<(), StorageError> {
        if self.disabled {
            return Err(StorageError::Unavailable("storage is disabled".to_string()));
        }
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_enabled()?;
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_enabled()?;

        if let Some(quota) = self.quota {
            let current = self.items.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let needed = self.usage() - current + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }

        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.check_enabled()?;
        self.items.remove(key);
        Ok(())
    }
}
