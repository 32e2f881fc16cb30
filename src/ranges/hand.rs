//! Starting-hand categories.
//!
//! A [`Hand`] is one of the 169 canonical two-card categories: 13 pocket
//! pairs, 78 suited and 78 offsuit combinations. Labels always put the higher
//! rank first (`AKs`, never `KAs`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::grid::RANKS;
use crate::error::RangeError;

/// Whether the two cards share a rank, a suit, or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandKind {
    /// Both cards share a rank.
    Pair,
    /// Two ranks, one suit.
    Suited,
    /// Two ranks, different suits.
    Offsuit,
}

/// A canonical starting-hand category.
///
/// Ranks are stored as indices into [`RANKS`] (0 = ace, 12 = deuce), so
/// `high <= low` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hand {
    high: u8,
    low: u8,
    kind: HandKind,
}

impl Hand {
    /// Pocket pair of the given rank index.
    pub fn pair(rank: u8) -> Self {
        debug_assert!(rank < 13, "rank index must be 0-12");
        Self { high: rank, low: rank, kind: HandKind::Pair }
    }

    /// Suited hand; the rank indices may be given in either order.
    pub fn suited(a: u8, b: u8) -> Self {
        debug_assert!(a != b, "suited hand needs two different ranks");
        Self { high: a.min(b), low: a.max(b), kind: HandKind::Suited }
    }

    /// Offsuit hand; the rank indices may be given in either order.
    pub fn offsuit(a: u8, b: u8) -> Self {
        debug_assert!(a != b, "offsuit hand needs two different ranks");
        Self { high: a.min(b), low: a.max(b), kind: HandKind::Offsuit }
    }

    /// Pair, suited or offsuit.
    pub fn kind(&self) -> HandKind {
        self.kind
    }

    /// Higher rank character, e.g. `'A'` for `AKs`.
    pub fn high_rank(&self) -> char {
        RANKS[self.high as usize]
    }

    /// Lower rank character; equal to the high rank for pairs.
    pub fn low_rank(&self) -> char {
        RANKS[self.low as usize]
    }

    /// Cell of this hand in the 13x13 grid.
    ///
    /// Pairs sit on the diagonal, suited hands above it and offsuit hands
    /// below it.
    pub fn grid_position(&self) -> (usize, usize) {
        let (high, low) = (self.high as usize, self.low as usize);
        match self.kind {
            HandKind::Pair | HandKind::Suited => (high, low),
            HandKind::Offsuit => (low, high),
        }
    }

    /// Number of concrete two-card combinations in this category.
    pub fn combos(&self) -> u32 {
        match self.kind {
            HandKind::Pair => 6,
            HandKind::Suited => 4,
            HandKind::Offsuit => 12,
        }
    }
}

fn rank_index(c: char) -> Option<u8> {
    RANKS.iter().position(|&r| r == c).map(|i| i as u8)
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            HandKind::Pair => write!(f, "{}{}", self.high_rank(), self.low_rank()),
            HandKind::Suited => write!(f, "{}{}s", self.high_rank(), self.low_rank()),
            HandKind::Offsuit => write!(f, "{}{}o", self.high_rank(), self.low_rank()),
        }
    }
}

impl FromStr for Hand {
    type Err = RangeError;

    /// Parse a canonical label such as `"AA"`, `"AKs"` or `"T9o"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RangeError::InvalidHandFormat {
            hand: s.to_string(),
            position: None,
        };

        let chars: Vec<char> = s.chars().collect();
        if chars.len() < 2 || chars.len() > 3 {
            return Err(invalid());
        }

        let first = rank_index(chars[0]).ok_or_else(invalid)?;
        let second = rank_index(chars[1]).ok_or_else(invalid)?;

        match (chars.get(2).copied(), first.cmp(&second)) {
            (None, std::cmp::Ordering::Equal) => Ok(Hand::pair(first)),
            (Some('s'), std::cmp::Ordering::Less) => Ok(Hand::suited(first, second)),
            (Some('o'), std::cmp::Ordering::Less) => Ok(Hand::offsuit(first, second)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Hand {
    type Error = RangeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Hand> for String {
    fn from(hand: Hand) -> Self {
        hand.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        for label in ["AA", "22", "AKs", "AKo", "T9s", "32o"] {
            let hand: Hand = label.parse().unwrap();
            assert_eq!(hand.to_string(), label);
        }
    }

    #[test]
    fn test_non_canonical_labels_rejected() {
        // Lower rank first, missing suffix, pair with suffix, unknown rank
        for label in ["KAs", "AK", "AAs", "A1s", "AKx", "", "A", "AKso", "akS"] {
            assert!(
                matches!(label.parse::<Hand>(), Err(RangeError::InvalidHandFormat { .. })),
                "{label} should be rejected"
            );
        }
    }

    #[test]
    fn test_grid_positions() {
        assert_eq!("AA".parse::<Hand>().unwrap().grid_position(), (0, 0));
        assert_eq!("AKs".parse::<Hand>().unwrap().grid_position(), (0, 1));
        assert_eq!("AKo".parse::<Hand>().unwrap().grid_position(), (1, 0));
        assert_eq!("22".parse::<Hand>().unwrap().grid_position(), (12, 12));
    }

    #[test]
    fn test_combo_counts() {
        assert_eq!(Hand::pair(0).combos(), 6);
        assert_eq!(Hand::suited(0, 1).combos(), 4);
        assert_eq!(Hand::offsuit(1, 0).combos(), 12);
    }
}
