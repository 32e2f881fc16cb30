//! # Range Editor
//!
//! Core of a preflop starting-hand range editor: assign RAISE, CALL or FOLD
//! to each of the 169 starting hands, separately for six table positions,
//! with per-position undo/redo, copy/paste between positions, persistence
//! and JSON import/export.
//!
//! ## Features
//!
//! - **13x13 Hand Grid**: pairs on the diagonal, suited above, offsuit below
//! - **Bounded History**: 50 undo and 50 redo snapshots per position
//! - **Pluggable Storage**: in-memory or on-disk key-value backends
//! - **Validated Import**: all-or-nothing checking of exported files
//!
//! ## Quick Start
//!
//! ```
//! use range_editor::{Action, MemoryStorage, Position, RangeStore, StoreConfig};
//!
//! let mut store = RangeStore::open(MemoryStorage::new(), StoreConfig::default()).unwrap();
//! store.set_selected_position(Position::CO);
//! store.update_hand("AKs".parse().unwrap(), Some(Action::Raise));
//!
//! let exported = range_editor::codec::export(store.ranges()).unwrap();
//! let imported = range_editor::codec::import(&exported).unwrap();
//! assert_eq!(imported[&Position::CO].len(), 1);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          RangeStore                             │
//! │  - Selected position      - Undo/redo per position              │
//! │  - Clipboard              - Last error message                  │
//! └─────────────────────────────────────────────────────────────────┘
//!          │                        │                       │
//!          │ persists through       │ validated by          │ drawn by
//!          ▼                        ▼                       ▼
//!   ┌──────────────┐         ┌─────────────┐         ┌─────────────┐
//!   │ Persistence  │         │    Codec    │         │   Render    │
//!   │ (one blob)   │         │ (JSON I/O)  │         │ (text/HTML) │
//!   └──────────────┘         └─────────────┘         └─────────────┘
//!          │
//!          ▼
//!   ┌──────────────┐
//!   │   Storage    │  Memory | File
//!   └──────────────┘
//! ```

#![warn(missing_docs)]

/// JSON import and export of range collections.
pub mod codec;

/// Crate-wide error type.
pub mod error;

/// Logger setup for binaries.
pub mod logging;

/// Positions, hands, actions, ranges and the hand grid.
pub mod ranges;

/// Terminal and HTML charts.
pub mod render;

/// Key-value storage backends and the persistence adapter.
pub mod storage;

/// Editor state with history and clipboard.
pub mod store;

// Re-export commonly used types at crate root for convenience
pub use error::{RangeError, Result};
pub use ranges::{Action, Hand, HandGrid, Position, Range, RangeCollection};
pub use storage::{FileStorage, MemoryStorage, RangePersistence, Storage, StorageError};
pub use store::{RangeStore, StoreConfig};
