//! Error types for range editing, persistence and import/export.
//!
//! Every fallible operation in the crate returns [`RangeError`]. Variants
//! carry enough detail (position, hand, action) to build a precise message,
//! and [`RangeError::user_message`] turns them into the sentence shown to the
//! person editing ranges.

use std::path::PathBuf;
use thiserror::Error;

use crate::ranges::Position;
use crate::storage::StorageError;

/// Errors produced by the range editor.
#[derive(Debug, Error)]
pub enum RangeError {
    /// Position code outside `BTN, CO, HJ, LJ, SB, BB`.
    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    /// Action outside `RAISE, CALL, FOLD`.
    #[error("Invalid action \"{action}\"{}", location(.hand.as_deref(), .position.as_ref()))]
    InvalidAction {
        /// Action as found in the input.
        action: String,
        /// Hand the action was assigned to.
        hand: Option<String>,
        /// Position the entry belongs to.
        position: Option<Position>,
    },

    /// Hand label that is not one of the 169 canonical labels.
    #[error("Invalid hand format: {hand}{}", location(None, .position.as_ref()))]
    InvalidHandFormat {
        /// Label as found in the input.
        hand: String,
        /// Position the entry belongs to.
        position: Option<Position>,
    },

    /// A value that must be a JSON object is something else.
    #[error("{}", not_an_object(.position.as_ref()))]
    InvalidFormat {
        /// Position whose value is not an object; `None` for the top level.
        position: Option<Position>,
    },

    /// Import data could not be parsed as JSON.
    #[error("Malformed JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    /// Import file does not carry the `.json` extension.
    #[error("Please select a valid JSON file: {}", .0.display())]
    InvalidFileType(PathBuf),

    /// File I/O error during import or export.
    #[error("Failed to {operation} file: {}", .path.display())]
    Io {
        /// What was being done (`read`, `write`, ...).
        operation: &'static str,
        /// File involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Storage read or write failed.
    #[error("Persistence failure: {0}")]
    Persistence(#[from] StorageError),
}

fn location(hand: Option<&str>, position: Option<&Position>) -> String {
    match (hand, position) {
        (Some(hand), Some(position)) => format!(" for hand {hand} in position {position}"),
        (Some(hand), None) => format!(" for hand {hand}"),
        (None, Some(position)) => format!(" in position {position}"),
        (None, None) => String::new(),
    }
}

fn not_an_object(position: Option<&Position>) -> String {
    match position {
        Some(position) => format!("Invalid ranges for position {position}"),
        None => "Invalid data format: Expected an object".to_string(),
    }
}

impl RangeError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::MalformedJson(_) => "The file appears to be corrupted or not properly formatted. \
                Please ensure it is a valid JSON file."
                .to_string(),
            Self::InvalidPosition(_) => "This file does not contain valid poker ranges. \
                Expected positions are: BTN, CO, HJ, LJ, SB, and BB."
                .to_string(),
            Self::InvalidAction { .. } => {
                "This file contains an invalid action. Only RAISE, CALL, and FOLD are allowed."
                    .to_string()
            }
            Self::InvalidHandFormat { .. } => "This file contains invalid hand combinations. \
                Please check the format of your hands (e.g., \"AKs\", \"KQo\")."
                .to_string(),
            Self::InvalidFileType(_) => "Please select a valid JSON file.".to_string(),
            Self::Io { operation, path, .. } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::Persistence(err) => format!("Could not save ranges: {err}"),
            Self::InvalidFormat { .. } => {
                "Could not import the file. Please ensure it contains valid poker ranges."
                    .to_string()
            }
        }
    }
}

/// Result type alias for range editor operations.
pub type Result<T> = std::result::Result<T, RangeError>;
