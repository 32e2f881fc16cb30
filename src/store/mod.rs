//! The range store.
//!
//! [`RangeStore`] owns the in-memory range collection, the selected
//! position, per-position undo/redo history and a transient clipboard. Every
//! mutation follows the same pattern:
//!
//! 1. snapshot the position's current range onto its undo stack
//! 2. clear the position's redo stack
//! 3. apply the change in memory
//! 4. persist the position's new range
//!
//! A failed write in step 4 does not roll back step 3. The failure is kept
//! as the store's error message (see [`RangeStore::error`]) and cleared by
//! the next successful operation or by [`RangeStore::clear_error`].
//!
//! # Example
//!
//! ```
//! use range_editor::ranges::{Action, Position};
//! use range_editor::storage::MemoryStorage;
//! use range_editor::store::{RangeStore, StoreConfig};
//!
//! let mut store = RangeStore::open(MemoryStorage::new(), StoreConfig::default()).unwrap();
//! store.update_hand("AKs".parse().unwrap(), Some(Action::Raise));
//! assert!(store.can_undo());
//!
//! store.undo();
//! assert!(store.range(Position::BTN).is_empty());
//! ```

pub mod config;
pub mod history;

use rustc_hash::FxHashMap;

use crate::error::{RangeError, Result};
use crate::ranges::{Action, Hand, Position, Range, RangeCollection};
use crate::storage::{RangePersistence, Storage, StoredRanges};

pub use config::{ConfigError, StoreConfig};
pub use history::{HistoryEntry, HistoryKind, HistoryStack, PositionHistory};

/// Range copied for pasting into another position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clipboard {
    /// Position the range was copied from.
    pub source: Position,
    /// The copied range.
    pub range: Range,
}

/// Editor state shared by every view of the ranges.
pub struct RangeStore<S: Storage> {
    config: StoreConfig,
    persistence: RangePersistence<S>,
    ranges: RangeCollection,
    selected: Position,
    history: FxHashMap<Position, PositionHistory>,
    clipboard: Option<Clipboard>,
    error: Option<String>,
}

impl<S: Storage> RangeStore<S> {
    /// Create a store with every position empty, without reading storage.
    ///
    /// Fails if `config` does not validate.
    pub fn new(storage: S, config: StoreConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let persistence = RangePersistence::new(storage, config.storage_key.clone());
        Ok(Self {
            selected: config.initial_position,
            config,
            persistence,
            ranges: RangeCollection::new(),
            history: FxHashMap::default(),
            clipboard: None,
            error: None,
        })
    }

    /// Create a store and, if configured, hydrate it from storage.
    pub fn open(storage: S, config: StoreConfig) -> std::result::Result<Self, ConfigError> {
        let hydrate = config.hydrate_on_open;
        let mut store = Self::new(storage, config)?;
        if hydrate {
            store.ranges = store.persistence.read_all();
            log::info!(
                "loaded ranges from '{}' ({} hands assigned)",
                store.persistence.key(),
                store.ranges.iter().map(|(_, r)| r.len()).sum::<usize>()
            );
        }
        Ok(store)
    }

    /// Switch the active position. Ranges and history are untouched.
    pub fn set_selected_position(&mut self, position: Position) {
        self.selected = position;
        self.error = None;
    }

    /// Switch the active position by code, rejecting unknown codes.
    ///
    /// On error the selection stays as it was.
    pub fn select(&mut self, code: &str) -> Result<Position> {
        let position: Position = code.parse()?;
        self.set_selected_position(position);
        Ok(position)
    }

    /// Active position.
    pub fn selected_position(&self) -> Position {
        self.selected
    }

    /// Set or clear one hand's action in the active position.
    pub fn update_hand(&mut self, hand: Hand, action: Option<Action>) {
        self.update_hand_for(self.selected, hand, action);
    }

    /// Set or clear one hand's action in `position`.
    pub fn update_hand_for(&mut self, position: Position, hand: Hand, action: Option<Action>) {
        self.record(position, HistoryKind::HandUpdate);
        self.ranges.get_mut(position).set(hand, action);
        log::debug!(
            "{} {} -> {}",
            position,
            hand,
            action.map_or("none", |a| a.name())
        );
        self.persist(position, "Failed to save hand action");
    }

    /// Replace the whole range of `position`.
    pub fn update_range_for_position(&mut self, position: Position, range: Range) {
        self.record(position, HistoryKind::RangeUpdate);
        self.ranges.replace(position, range);
        log::debug!("{} replaced ({} hands)", position, self.ranges.get(position).len());
        self.persist(position, "Failed to update range");
    }

    /// Clear the active position's range.
    pub fn reset_range(&mut self) {
        let position = self.selected;
        self.record(position, HistoryKind::Reset);
        self.ranges.replace(position, Range::new());
        log::debug!("{} reset", position);
        self.persist(position, "Failed to reset range");
    }

    /// Restore the active position's previous range. No-op without history.
    pub fn undo(&mut self) {
        let position = self.selected;
        let limit = self.config.history_limit;
        let history = self
            .history
            .entry(position)
            .or_insert_with(|| PositionHistory::new(limit));

        let Some(entry) = history.undo.pop() else {
            return;
        };

        let current = self.ranges.replace(position, entry.range);
        history.redo.push(HistoryEntry::new(current, HistoryKind::Undo));
        log::debug!("{} undo ({} left)", position, history.undo.len());
        self.persist(position, "Failed to undo");
    }

    /// Re-apply the range most recently undone. No-op without redo history.
    pub fn redo(&mut self) {
        let position = self.selected;
        let limit = self.config.history_limit;
        let history = self
            .history
            .entry(position)
            .or_insert_with(|| PositionHistory::new(limit));

        let Some(entry) = history.redo.pop() else {
            return;
        };

        let current = self.ranges.replace(position, entry.range);
        history.undo.push(HistoryEntry::new(current, HistoryKind::Redo));
        log::debug!("{} redo ({} left)", position, history.redo.len());
        self.persist(position, "Failed to redo");
    }

    /// Whether the active position has anything to undo.
    pub fn can_undo(&self) -> bool {
        self.undo_depth(self.selected) > 0
    }

    /// Whether the active position has anything to redo.
    pub fn can_redo(&self) -> bool {
        self.redo_depth(self.selected) > 0
    }

    /// Number of undo snapshots held for `position`.
    pub fn undo_depth(&self, position: Position) -> usize {
        self.history.get(&position).map_or(0, |h| h.undo.len())
    }

    /// Number of redo snapshots held for `position`.
    pub fn redo_depth(&self, position: Position) -> usize {
        self.history.get(&position).map_or(0, |h| h.redo.len())
    }

    /// Undo/redo stacks for `position`, if it has been edited.
    pub fn history(&self, position: Position) -> Option<&PositionHistory> {
        self.history.get(&position)
    }

    /// Replace the in-memory range of `position` with the persisted one.
    ///
    /// Leaves the range alone when nothing is persisted for that position.
    /// History and other positions are not touched.
    pub fn load_range(&mut self, position: Position) {
        if let Some(range) = self.persistence.read_position(position) {
            log::info!("loaded {} ({} hands)", position, range.len());
            self.ranges.replace(position, range);
        }
        self.error = None;
    }

    /// Copy the range currently persisted for `position` into the clipboard.
    ///
    /// Returns false if storage could not be read. When nothing is persisted
    /// for the position the clipboard ends up empty.
    pub fn copy_range(&mut self, position: Position) -> bool {
        match self.persistence.try_read_position(position) {
            Ok(range) => {
                self.clipboard = range.map(|range| Clipboard {
                    source: position,
                    range,
                });
                log::debug!("copied {} (clipboard full: {})", position, self.clipboard.is_some());
                true
            }
            Err(e) => {
                log::error!("copying {} failed: {}", position, e);
                false
            }
        }
    }

    /// Paste the clipboard into `target` as a full range update.
    ///
    /// Returns false when the clipboard is empty or the pasted range could
    /// not be persisted (it is still applied in memory).
    pub fn paste_range(&mut self, target: Position) -> bool {
        let Some(clipboard) = self.clipboard.clone() else {
            return false;
        };
        log::debug!("pasting {} into {}", clipboard.source, target);
        self.update_range_for_position(target, clipboard.range);
        self.error.is_none()
    }

    /// Last copied range, if any.
    pub fn clipboard(&self) -> Option<&Clipboard> {
        self.clipboard.as_ref()
    }

    /// Whether a paste would do anything.
    pub fn can_paste(&self) -> bool {
        self.clipboard.is_some()
    }

    /// Apply validated imported ranges, one position at a time.
    ///
    /// Each position becomes its own history entry.
    pub fn apply_import(&mut self, imported: StoredRanges) {
        let count = imported.len();
        for (position, range) in imported {
            self.update_range_for_position(position, range);
        }
        log::info!("imported ranges for {} positions", count);
    }

    /// Every position's in-memory range.
    pub fn ranges(&self) -> &RangeCollection {
        &self.ranges
    }

    /// In-memory range of `position`.
    pub fn range(&self, position: Position) -> &Range {
        self.ranges.get(position)
    }

    /// Range of the active position.
    pub fn current_range(&self) -> &Range {
        self.ranges.get(self.selected)
    }

    /// Message from the last failed operation, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Dismiss the current error message.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Configuration the store was opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Persistence adapter backing the store.
    pub fn persistence(&self) -> &RangePersistence<S> {
        &self.persistence
    }

    /// Mutable access to the persistence adapter.
    pub fn persistence_mut(&mut self) -> &mut RangePersistence<S> {
        &mut self.persistence
    }

    fn record(&mut self, position: Position, kind: HistoryKind) {
        let limit = self.config.history_limit;
        let before = self.ranges.get(position).clone();
        self.history
            .entry(position)
            .or_insert_with(|| PositionHistory::new(limit))
            .record(before, kind);
    }

    fn persist(&mut self, position: Position, context: &str) {
        let range = self.ranges.get(position).clone();
        match self.persistence.write_position(position, &range) {
            Ok(()) => self.error = None,
            Err(e) => {
                log::error!("{} ({}): {}", context, position, e);
                self.error = Some(persistence_message(context, &e));
            }
        }
    }
}

fn persistence_message(context: &str, err: &RangeError) -> String {
    match err {
        RangeError::Persistence(inner) => format!("{context}: {inner}"),
        other => format!("{context}: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn hand(label: &str) -> Hand {
        label.parse().unwrap()
    }

    fn store() -> RangeStore<MemoryStorage> {
        RangeStore::open(MemoryStorage::new(), StoreConfig::default()).unwrap()
    }

    #[test]
    fn test_new_store_is_empty_on_btn() {
        let store = store();
        assert_eq!(store.selected_position(), Position::BTN);
        assert_eq!(store.ranges(), &RangeCollection::new());
        assert!(!store.can_undo());
        assert!(!store.can_redo());
        assert!(!store.can_paste());
        assert!(store.error().is_none());
    }

    #[test]
    fn test_select_rejects_unknown_code() {
        let mut store = store();
        store.select("CO").unwrap();
        assert!(matches!(store.select("XX"), Err(RangeError::InvalidPosition(_))));
        assert_eq!(store.selected_position(), Position::CO);
    }

    #[test]
    fn test_update_hand_persists() {
        let mut store = store();
        store.update_hand(hand("AA"), Some(Action::Raise));
        store.update_hand(hand("AKo"), Some(Action::Call));
        store.update_hand(hand("AKo"), None);

        let persisted = store.persistence().read_all();
        assert_eq!(persisted.get(Position::BTN), store.range(Position::BTN));
        assert_eq!(store.range(Position::BTN).len(), 1);
        assert_eq!(store.undo_depth(Position::BTN), 3);
    }

    #[test]
    fn test_undo_redo_exchange_snapshots() {
        let mut store = store();
        store.update_hand(hand("AA"), Some(Action::Raise));
        let after_first = store.current_range().clone();
        store.update_hand(hand("KK"), Some(Action::Raise));
        let after_second = store.current_range().clone();

        store.undo();
        assert_eq!(store.current_range(), &after_first);
        assert!(store.can_redo());
        assert_eq!(store.history(Position::BTN).unwrap().redo.peek().unwrap().kind, HistoryKind::Undo);

        store.redo();
        assert_eq!(store.current_range(), &after_second);
        assert_eq!(store.persistence().read_all().get(Position::BTN), &after_second);
        assert_eq!(store.history(Position::BTN).unwrap().undo.peek().unwrap().kind, HistoryKind::Redo);
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut store = store();
        store.undo();
        store.redo();
        assert!(store.current_range().is_empty());
        assert!(!store.can_undo());
        assert!(!store.can_redo());
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut store = store();
        store.update_hand(hand("AA"), Some(Action::Raise));
        store.undo();
        assert!(store.can_redo());
        store.update_hand(hand("KK"), Some(Action::Raise));
        assert!(!store.can_redo());
    }

    #[test]
    fn test_range_update_clears_redo() {
        let mut store = store();
        store.update_hand(hand("AA"), Some(Action::Raise));
        store.undo();
        store.update_range_for_position(Position::BTN, Range::new());
        assert!(!store.can_redo());
    }

    #[test]
    fn test_history_is_per_position() {
        let mut store = store();
        store.update_hand(hand("AA"), Some(Action::Raise));
        store.set_selected_position(Position::CO);
        assert!(!store.can_undo());

        store.undo();
        assert_eq!(store.range(Position::BTN).len(), 1);
    }

    #[test]
    fn test_reset_is_undoable() {
        let mut store = store();
        store.update_hand(hand("AA"), Some(Action::Raise));
        store.reset_range();
        assert!(store.current_range().is_empty());
        assert!(store.persistence().read_all().get(Position::BTN).is_empty());

        store.undo();
        assert_eq!(store.current_range().get(&hand("AA")), Some(Action::Raise));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut store = store();
        for (i, h) in crate::ranges::grid::all_hands().take(60).enumerate() {
            let action = if i % 2 == 0 { Action::Raise } else { Action::Call };
            store.update_hand(h, Some(action));
        }
        assert_eq!(store.undo_depth(Position::BTN), 50);

        for _ in 0..60 {
            store.undo();
        }
        // Snapshots older than the newest 50 are gone
        assert_eq!(store.current_range().len(), 10);
        assert_eq!(store.redo_depth(Position::BTN), 50);
    }

    #[test]
    fn test_custom_history_limit() {
        let config = StoreConfig::default().with_history_limit(2);
        let mut store = RangeStore::open(MemoryStorage::new(), config).unwrap();
        for label in ["AA", "KK", "QQ"] {
            store.update_hand(hand(label), Some(Action::Raise));
        }
        assert_eq!(store.undo_depth(Position::BTN), 2);
    }

    #[test]
    fn test_copy_paste() {
        let mut store = store();
        store.update_hand(hand("AA"), Some(Action::Raise));
        store.update_hand(hand("AKs"), Some(Action::Call));
        let btn = store.range(Position::BTN).clone();

        assert!(store.copy_range(Position::BTN));
        assert!(store.can_paste());
        assert!(store.paste_range(Position::CO));

        assert_eq!(store.range(Position::CO), &btn);
        assert_eq!(store.persistence().read_position(Position::CO), Some(btn));
        assert_eq!(store.undo_depth(Position::CO), 1);
    }

    #[test]
    fn test_paste_without_copy_fails() {
        let mut store = store();
        assert!(!store.paste_range(Position::CO));
        assert_eq!(store.undo_depth(Position::CO), 0);
    }

    #[test]
    fn test_copy_of_unpersisted_position_leaves_clipboard_empty() {
        let mut store = store();
        assert!(store.copy_range(Position::HJ));
        assert!(!store.can_paste());
    }

    #[test]
    fn test_load_range_only_touches_one_position() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item("poker-ranges", r#"{"BTN": {"AA": "RAISE"}, "CO": {"KK": "CALL"}}"#)
            .unwrap();
        let config = StoreConfig::default().with_hydrate_on_open(false);
        let mut store = RangeStore::open(storage, config).unwrap();
        assert!(store.range(Position::BTN).is_empty());

        store.load_range(Position::CO);
        assert_eq!(store.range(Position::CO).get(&hand("KK")), Some(Action::Call));
        assert!(store.range(Position::BTN).is_empty());
        assert!(!store.can_undo());

        store.load_range(Position::SB);
        assert!(store.range(Position::SB).is_empty());
    }

    #[test]
    fn test_open_hydrates_from_storage() {
        let mut storage = MemoryStorage::new();
        storage.set_item("poker-ranges", r#"{"LJ": {"QQ": "FOLD"}}"#).unwrap();
        let store = RangeStore::open(storage, StoreConfig::default()).unwrap();
        assert_eq!(store.range(Position::LJ).get(&hand("QQ")), Some(Action::Fold));
    }

    #[test]
    fn test_persistence_failure_keeps_mutation_and_sets_error() {
        let mut store = RangeStore::open(MemoryStorage::with_quota(16), StoreConfig::default()).unwrap();
        store.update_hand(hand("AA"), Some(Action::Raise));

        assert_eq!(store.current_range().get(&hand("AA")), Some(Action::Raise));
        let message = store.error().unwrap();
        assert!(message.starts_with("Failed to save hand action"));
        assert!(store.can_undo());

        store.clear_error();
        assert!(store.error().is_none());
    }

    #[test]
    fn test_error_cleared_by_next_successful_write() {
        let mut store = store();
        store.persistence_mut().storage_mut().set_disabled(true);
        store.update_hand(hand("AA"), Some(Action::Raise));
        assert!(store.error().is_some());

        store.persistence_mut().storage_mut().set_disabled(false);
        store.update_hand(hand("KK"), Some(Action::Raise));
        assert!(store.error().is_none());
    }

    #[test]
    fn test_paste_reports_persistence_failure() {
        let mut store = store();
        store.update_hand(hand("AA"), Some(Action::Raise));
        assert!(store.copy_range(Position::BTN));

        store.persistence_mut().storage_mut().set_disabled(true);
        assert!(!store.paste_range(Position::CO));
        assert_eq!(store.range(Position::CO).len(), 1);
    }

    #[test]
    fn test_apply_import_is_per_position() {
        let mut store = store();
        let mut imported = StoredRanges::new();
        imported.insert(Position::SB, Range::new().with(hand("AA"), Action::Raise));
        imported.insert(Position::BB, Range::new().with(hand("72o"), Action::Fold));
        store.apply_import(imported);

        assert_eq!(store.range(Position::SB).len(), 1);
        assert_eq!(store.range(Position::BB).len(), 1);
        assert_eq!(store.undo_depth(Position::SB), 1);
        assert_eq!(store.undo_depth(Position::BB), 1);
        assert!(store.range(Position::BTN).is_empty());
    }

    #[test]
    fn test_open_rejects_invalid_config() {
        let config = StoreConfig::default().with_history_limit(0);
        assert!(matches!(
            RangeStore::open(MemoryStorage::new(), config),
            Err(ConfigError::ZeroHistoryLimit)
        ));
        assert!(matches!(
            RangeStore::new(MemoryStorage::new(), StoreConfig::default().with_storage_key("")),
            Err(ConfigError::EmptyStorageKey)
        ));
        assert_eq!(store().config().history_limit, 50);
    }

    #[test]
    fn test_undo_redo_keep_restore_when_persist_fails() {
        let mut store = store();
        store.update_hand(hand("AA"), Some(Action::Raise));
        store.update_hand(hand("KK"), Some(Action::Call));
        let both = store.current_range().clone();

        store.persistence_mut().storage_mut().set_disabled(true);

        store.undo();
        assert_eq!(store.current_range().len(), 1);
        assert_eq!(store.current_range().get(&hand("AA")), Some(Action::Raise));
        assert!(store.error().unwrap().starts_with("Failed to undo"));
        assert!(store.can_redo());

        store.clear_error();
        store.redo();
        assert_eq!(store.current_range(), &both);
        assert!(store.error().unwrap().starts_with("Failed to redo"));
        assert!(store.can_undo());
    }

    #[test]
    fn test_edit_keeps_persisted_positions_next_to_bad_entries() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                "poker-ranges",
                r#"{"BTN": {"AA": "RAISE", "KK": "RAISE", "QQ": "CALL"},
                    "SB": {"AKs": "RAISE"},
                    "CO": {"KAs": "RAISE"}}"#,
            )
            .unwrap();
        let mut store = RangeStore::open(storage, StoreConfig::default()).unwrap();
        assert_eq!(store.range(Position::BTN).len(), 3);

        store.set_selected_position(Position::HJ);
        store.update_hand(hand("22"), Some(Action::Fold));
        assert!(store.error().is_none());

        let persisted = store.persistence().read_all();
        assert_eq!(persisted.get(Position::BTN).len(), 3);
        assert_eq!(persisted.get(Position::SB).get(&hand("AKs")), Some(Action::Raise));
        assert_eq!(persisted.get(Position::HJ).get(&hand("22")), Some(Action::Fold));
    }
}
