//! Range data model.
//!
//! This module defines the vocabulary every other part of the crate speaks:
//!
//! - [`Position`]: one of the six table positions
//! - [`Hand`]: one of the 169 starting-hand categories
//! - [`Action`]: RAISE, CALL or FOLD (absence means "no action")
//! - [`Range`]: hand → action for one position
//! - [`RangeCollection`]: range for every position, the unit of persistence
//!
//! The [`grid`] submodule lays the 169 hands out as the familiar 13x13 chart.

mod action;
pub mod grid;
mod hand;
mod position;
mod range;

pub use action::Action;
pub use grid::{generate, hand_at, HandGrid, NUM_HANDS, RANKS};
pub use hand::{Hand, HandKind};
pub use position::Position;
pub use range::{Range, RangeCollection, TOTAL_COMBOS};
