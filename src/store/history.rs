//! Bounded undo/redo history.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::ranges::Range;

/// What produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryKind {
    /// One hand painted or erased.
    HandUpdate,
    /// Whole range replaced (paste, import).
    RangeUpdate,
    /// Range cleared.
    Reset,
    /// Entry pushed onto the redo stack by an undo.
    Undo,
    /// Entry pushed onto the undo stack by a redo.
    Redo,
}

/// Snapshot of a position's range taken just before it changed.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Range as it was when the entry was taken.
    pub range: Range,
    /// Operation that produced the entry.
    pub kind: HistoryKind,
    /// When the entry was taken.
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Snapshot `range`, stamped with the current time.
    pub fn new(range: Range, kind: HistoryKind) -> Self {
        Self {
            range,
            kind,
            timestamp: Utc::now(),
        }
    }
}

/// Stack of snapshots with a fixed maximum depth.
///
/// Newest entries sit at the front; pushing onto a full stack evicts the
/// oldest entry from the back.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    entries: VecDeque<HistoryEntry>,
    limit: usize,
}

impl HistoryStack {
    /// Empty stack holding at most `limit` entries.
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit.min(64)),
            limit,
        }
    }

    /// Push a snapshot, returning the evicted entry if the stack was full.
    pub fn push(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
        self.entries.push_front(entry);
        if self.entries.len() > self.limit {
            self.entries.pop_back()
        } else {
            None
        }
    }

    /// Remove and return the newest snapshot.
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop_front()
    }

    /// Newest snapshot without removing it.
    pub fn peek(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the stack holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Undo and redo stacks for one position.
#[derive(Debug, Clone)]
pub struct PositionHistory {
    /// Snapshots restored by undo.
    pub undo: HistoryStack,
    /// Snapshots restored by redo.
    pub redo: HistoryStack,
}

impl PositionHistory {
    /// Empty undo and redo stacks, each holding at most `limit` entries.
    pub fn new(limit: usize) -> Self {
        Self {
            undo: HistoryStack::new(limit),
            redo: HistoryStack::new(limit),
        }
    }

    /// Record the range as it was before a new edit.
    ///
    /// A new edit forks history, so anything that could have been redone is
    /// discarded.
    pub fn record(&mut self, before: Range, kind: HistoryKind) {
        self.undo.push(HistoryEntry::new(before, kind));
        self.redo.clear();
    }
}
