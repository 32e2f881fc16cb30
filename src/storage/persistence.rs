//! Persistence adapter for the range collection.

use std::collections::BTreeMap;

use serde_json::Value;

use super::{Storage, StorageError};
use crate::error::Result;
use crate::ranges::{Action, Hand, Position, Range, RangeCollection};

/// Ranges as found in storage: only the positions that were actually written.
pub type StoredRanges = BTreeMap<Position, Range>;

/// Reads and writes the whole range collection as one JSON blob under a
/// single storage key.
///
/// [`read_all`](Self::read_all) never fails outward: a missing value, an
/// unreadable backend and a value that is not JSON all read as "nothing
/// stored", and individual bad entries are dropped. Per-position writes are
/// read-modify-write over the whole blob and assume a single writer; they
/// refuse to write when the current blob cannot be read, so other positions
/// are never overwritten with empty ranges.
#[derive(Debug)]
pub struct RangePersistence<S: Storage> {
    storage: S,
    key: String,
}

impl<S: Storage> RangePersistence<S> {
    /// Create an adapter storing under `key`.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Storage key the blob lives under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Backend this adapter writes to.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable access to the backend.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Read the stored blob, surfacing backend failures.
    ///
    /// A value that is not a JSON object reads as empty. Inside an object,
    /// entries with an unknown position, a bad hand label or an unknown
    /// action are logged and dropped; everything else is kept.
    pub fn read_stored(&self) -> Result<StoredRanges> {
        let Some(text) = self.storage.get_item(&self.key)? else {
            return Ok(StoredRanges::new());
        };

        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Ok(self.salvage(&value)),
            Err(e) => {
                log::warn!("ignoring unreadable ranges under '{}': {}", self.key, e);
                Ok(StoredRanges::new())
            }
        }
    }

    fn salvage(&self, value: &Value) -> StoredRanges {
        let mut stored = StoredRanges::new();
        let Some(positions) = value.as_object() else {
            log::warn!("ignoring ranges under '{}': not an object", self.key);
            return stored;
        };

        for (code, hands) in positions {
            let Ok(position) = code.parse::<Position>() else {
                log::warn!("dropping unknown position '{}' under '{}'", code, self.key);
                continue;
            };
            let Some(hands) = hands.as_object() else {
                log::warn!("dropping {} under '{}': not an object", position, self.key);
                continue;
            };

            let mut range = Range::new();
            for (label, raw) in hands {
                match (label.parse::<Hand>(), raw.as_str().map(str::parse::<Action>)) {
                    (Ok(hand), Some(Ok(action))) => range.set(hand, Some(action)),
                    _ => log::warn!("dropping {} {} = {} under '{}'", position, label, raw, self.key),
                }
            }
            stored.insert(position, range);
        }

        stored
    }

    /// Read every position's range; empty when nothing usable is stored.
    pub fn read_all(&self) -> RangeCollection {
        match self.read_stored() {
            Ok(stored) => stored.into(),
            Err(e) => {
                log::warn!("reading ranges under '{}' failed: {}", self.key, e);
                RangeCollection::new()
            }
        }
    }

    /// Serialize and store the whole collection, overwriting what was there.
    pub fn write_all(&mut self, collection: &RangeCollection) -> Result<()> {
        let json = serde_json::to_string(collection).map_err(StorageError::from)?;
        self.storage.set_item(&self.key, &json)?;
        log::trace!("persisted {} bytes under '{}'", json.len(), self.key);
        Ok(())
    }

    /// Range stored for one position, if that position was ever written.
    pub fn read_position(&self, position: Position) -> Option<Range> {
        self.try_read_position(position).unwrap_or_else(|e| {
            log::warn!("reading {} from '{}' failed: {}", position, self.key, e);
            None
        })
    }

    /// Like [`read_position`](Self::read_position) but reports backend failures.
    pub fn try_read_position(&self, position: Position) -> Result<Option<Range>> {
        Ok(self.read_stored()?.remove(&position))
    }

    /// Replace one position's stored range, keeping the others.
    pub fn write_position(&mut self, position: Position, range: &Range) -> Result<()> {
        let mut collection = RangeCollection::from(self.read_stored()?);
        collection.replace(position, range.clone());
        self.write_all(&collection)
    }
}
