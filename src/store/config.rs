//! Configuration for the range store.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ranges::Position;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "poker-ranges";

/// Undo/redo depth used when none is configured.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Configuration for a [`RangeStore`](super::RangeStore).
///
/// # Example
/// ```
/// use range_editor::store::StoreConfig;
///
/// let config = StoreConfig::default();
/// assert_eq!(config.history_limit, 50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Key the whole range collection is persisted under.
    pub storage_key: String,

    /// Maximum depth of each position's undo and redo stack.
    ///
    /// When a stack is full the oldest snapshot is dropped.
    pub history_limit: usize,

    /// Position selected when the store is opened.
    pub initial_position: Position,

    /// Load previously persisted ranges when the store is opened.
    pub hydrate_on_open: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            initial_position: Position::BTN,
            hydrate_on_open: true,
        }
    }
}

impl StoreConfig {
    /// Create a StoreConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Builder method: set the undo/redo depth.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Builder method: set the initially selected position.
    pub fn with_initial_position(mut self, position: Position) -> Self {
        self.initial_position = position;
        self
    }

    /// Builder method: set whether persisted ranges are loaded on open.
    pub fn with_hydrate_on_open(mut self, enable: bool) -> Self {
        self.hydrate_on_open = enable;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }

        if self.history_limit == 0 {
            return Err(ConfigError::ZeroHistoryLimit);
        }

        Ok(())
    }
}

/// Errors that can occur when validating store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Storage key is empty or whitespace.
    #[error("storage key must not be empty")]
    EmptyStorageKey,
    /// History limit of zero would disable undo entirely.
    #[error("history limit must be at least 1")]
    ZeroHistoryLimit,
}
