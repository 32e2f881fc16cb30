//! Ranges and the per-position range collection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::action::Action;
use super::hand::Hand;
use super::position::Position;

/// Total number of two-card combinations.
pub const TOTAL_COMBOS: u32 = 1326;

/// Assignment of actions to hands for one position.
///
/// A hand with no action has no entry; setting a hand to `None` removes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Range {
    hands: BTreeMap<Hand, Action>,
}

impl Range {
    /// Create an empty range.
    pub fn new() -> Self {
        Self::default()
    }

    /// Action assigned to a hand, if any.
    pub fn get(&self, hand: &Hand) -> Option<Action> {
        self.hands.get(hand).copied()
    }

    /// Assign an action to a hand, or remove it with `None`.
    pub fn set(&mut self, hand: Hand, action: Option<Action>) {
        match action {
            Some(action) => {
                self.hands.insert(hand, action);
            }
            None => {
                self.hands.remove(&hand);
            }
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, hand: Hand, action: Action) -> Self {
        self.set(hand, Some(action));
        self
    }

    /// Number of hands with an action.
    pub fn len(&self) -> usize {
        self.hands.len()
    }

    /// Whether no hand has an action.
    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    /// Assigned hands in hand order.
    pub fn iter(&self) -> impl Iterator<Item = (&Hand, &Action)> {
        self.hands.iter()
    }

    /// Number of hands assigned to each action, in [`Action::all`] order.
    pub fn counts(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for action in self.hands.values() {
            match action {
                Action::Raise => counts[0] += 1,
                Action::Call => counts[1] += 1,
                Action::Fold => counts[2] += 1,
            }
        }
        counts
    }

    /// Share of all 1326 combos assigned to `action`.
    pub fn combo_fraction(&self, action: Action) -> f64 {
        let combos: u32 = self
            .hands
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(h, _)| h.combos())
            .sum();
        combos as f64 / TOTAL_COMBOS as f64
    }
}

impl FromIterator<(Hand, Action)> for Range {
    fn from_iter<I: IntoIterator<Item = (Hand, Action)>>(iter: I) -> Self {
        Self { hands: iter.into_iter().collect() }
    }
}

/// Ranges for every position.
///
/// Always holds all six positions; a position nobody has painted yet maps to
/// an empty [`Range`]. Serializes as a JSON object keyed by position code,
/// and deserializing fills in any position missing from the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Position, Range>", into = "BTreeMap<Position, Range>")]
pub struct RangeCollection {
    ranges: [Range; 6],
}

impl Default for RangeCollection {
    fn default() -> Self {
        Self { ranges: std::array::from_fn(|_| Range::new()) }
    }
}

impl RangeCollection {
    /// Create a collection with every position empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Range of one position.
    pub fn get(&self, position: Position) -> &Range {
        &self.ranges[position.index()]
    }

    /// Mutable range of one position.
    pub fn get_mut(&mut self, position: Position) -> &mut Range {
        &mut self.ranges[position.index()]
    }

    /// Replace one position's range, returning the previous one.
    pub fn replace(&mut self, position: Position, range: Range) -> Range {
        std::mem::replace(&mut self.ranges[position.index()], range)
    }

    /// Iterate positions and their ranges in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Range)> {
        Position::all().iter().map(move |&p| (p, self.get(p)))
    }
}

impl From<BTreeMap<Position, Range>> for RangeCollection {
    fn from(map: BTreeMap<Position, Range>) -> Self {
        let mut collection = Self::new();
        for (position, range) in map {
            collection.replace(position, range);
        }
        collection
    }
}

impl From<RangeCollection> for BTreeMap<Position, Range> {
    fn from(collection: RangeCollection) -> Self {
        Position::all()
            .iter()
            .copied()
            .zip(collection.ranges)
            .collect()
    }
}
