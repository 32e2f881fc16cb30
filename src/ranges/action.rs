//! Actions that can be painted onto a hand.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RangeError;

/// Action assigned to a hand.
///
/// "No action" is not a variant: a hand without an action simply has no
/// entry in its [`Range`](super::Range), and setters take `Option<Action>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    /// Open or re-raise.
    Raise,
    /// Flat call.
    Call,
    /// Fold.
    Fold,
}

impl Action {
    /// Wire name (`RAISE`, `CALL` or `FOLD`).
    pub fn name(&self) -> &'static str {
        match self {
            Action::Raise => "RAISE",
            Action::Call => "CALL",
            Action::Fold => "FOLD",
        }
    }

    /// All actions in display order.
    pub fn all() -> &'static [Action] {
        &[Action::Raise, Action::Call, Action::Fold]
    }

    /// Parse an optional action as typed by a user: an action name in any
    /// case, or `none` / `clear` / `-` for "no action".
    pub fn parse_optional(s: &str) -> Result<Option<Action>, RangeError> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "clear" | "-" => Ok(None),
            other => other.to_ascii_uppercase().parse().map(Some),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Action {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::all()
            .iter()
            .copied()
            .find(|a| a.name() == s)
            .ok_or_else(|| RangeError::InvalidAction {
                action: s.to_string(),
                hand: None,
                position: None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&Action::Raise).unwrap(), "\"RAISE\"");
        assert_eq!(serde_json::from_str::<Action>("\"FOLD\"").unwrap(), Action::Fold);
        assert!(serde_json::from_str::<Action>("\"BET\"").is_err());
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(Action::parse_optional("raise").unwrap(), Some(Action::Raise));
        assert_eq!(Action::parse_optional("CALL").unwrap(), Some(Action::Call));
        assert_eq!(Action::parse_optional("none").unwrap(), None);
        assert_eq!(Action::parse_optional("-").unwrap(), None);
        assert!(Action::parse_optional("bet").is_err());
    }
}
