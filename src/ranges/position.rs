//! Table positions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RangeError;

/// Position at a 6-max table.
///
/// Ordered from the button backwards to the blinds, which is also the order
/// positions appear in persisted and exported files.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Position {
    /// Button.
    #[default]
    BTN,
    /// Cutoff.
    CO,
    /// Hijack.
    HJ,
    /// Lojack.
    LJ,
    /// Small blind.
    SB,
    /// Big blind.
    BB,
}

impl Position {
    /// Position code as written in files.
    pub fn name(&self) -> &'static str {
        match self {
            Position::BTN => "BTN",
            Position::CO => "CO",
            Position::HJ => "HJ",
            Position::LJ => "LJ",
            Position::SB => "SB",
            Position::BB => "BB",
        }
    }

    /// All positions in table order.
    pub fn all() -> &'static [Position] {
        &[Position::BTN, Position::CO, Position::HJ, Position::LJ, Position::SB, Position::BB]
    }

    /// Index into [`Position::all`].
    pub fn index(&self) -> usize {
        match self {
            Position::BTN => 0,
            Position::CO => 1,
            Position::HJ => 2,
            Position::LJ => 3,
            Position::SB => 4,
            Position::BB => 5,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Position {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::all()
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| RangeError::InvalidPosition(s.to_string()))
    }
}

impl TryFrom<String> for Position {
    type Error = RangeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.name().to_string()
    }
}
