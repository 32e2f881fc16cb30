//! The 13x13 starting-hand grid.
//!
//! Rows and columns follow [`RANKS`] from ace down to deuce. For the cell at
//! `(row, col)`:
//! - `row == col`: pocket pair (diagonal)
//! - `row < col`: suited hand (upper triangle)
//! - `row > col`: offsuit hand (lower triangle), labelled with the column's
//!   rank first
//!
//! ```text
//!        A     K     Q   ...
//!   A   AA   AKs   AQs
//!   K  AKo    KK   KQs
//!   Q  AQo   KQo    QQ
//! ```

use super::hand::Hand;

/// Card ranks from highest to lowest.
pub const RANKS: [char; 13] = ['A', 'K', 'Q', 'J', 'T', '9', '8', '7', '6', '5', '4', '3', '2'];

/// Number of distinct starting-hand categories.
pub const NUM_HANDS: usize = 169;

/// The full grid, indexed `[row][col]`.
pub type HandGrid = [[Hand; 13]; 13];

/// Hand at a grid cell.
pub fn hand_at(row: usize, col: usize) -> Hand {
    debug_assert!(row < 13 && col < 13, "grid cell out of range");
    let (row, col) = (row as u8, col as u8);
    if row == col {
        Hand::pair(row)
    } else if row < col {
        Hand::suited(row, col)
    } else {
        Hand::offsuit(col, row)
    }
}

/// Generate the 13x13 hand grid.
pub fn generate() -> HandGrid {
    std::array::from_fn(|row| std::array::from_fn(|col| hand_at(row, col)))
}

/// All 169 hands in grid order (row by row).
pub fn all_hands() -> impl Iterator<Item = Hand> {
    (0..13).flat_map(|row| (0..13).map(move |col| hand_at(row, col)))
}
