//! JSON import and export of range collections.
//!
//! The file format is the same flat object the store persists:
//!
//! ```json
//! {
//!   "BTN": { "AA": "RAISE", "AKs": "RAISE" },
//!   "CO":  {},
//!   "HJ":  {},
//!   "LJ":  {},
//!   "SB":  {},
//!   "BB":  {}
//! }
//! ```
//!
//! Import is all-or-nothing at the validation step: nothing is returned if
//! any entry is invalid. Applying the result is left to the caller
//! ([`RangeStore::apply_import`](crate::store::RangeStore::apply_import)),
//! which updates one position at a time.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use serde_json::Value;

use crate::error::{RangeError, Result};
use crate::ranges::{Action, Hand, Position, RangeCollection};
use crate::storage::StoredRanges;

/// Check that `data` is a well-formed range collection.
///
/// Rules, checked in order and stopping at the first violation:
/// 1. `data` is an object
/// 2. every key is one of the six positions
/// 3. every value is an object
/// 4. every hand's value is RAISE, CALL or FOLD
/// 5. every hand key is a canonical hand label
pub fn validate(data: &Value) -> Result<()> {
    let positions = data
        .as_object()
        .ok_or(RangeError::InvalidFormat { position: None })?;

    for (code, hands) in positions {
        let position: Position = code.parse()?;

        let hands = hands
            .as_object()
            .ok_or(RangeError::InvalidFormat { position: Some(position) })?;

        for (hand, action) in hands {
            let action_name = match action {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            if action_name.parse::<Action>().is_err() {
                return Err(RangeError::InvalidAction {
                    action: action_name,
                    hand: Some(hand.clone()),
                    position: Some(position),
                });
            }

            if hand.parse::<Hand>().is_err() {
                return Err(RangeError::InvalidHandFormat {
                    hand: hand.clone(),
                    position: Some(position),
                });
            }
        }
    }

    Ok(())
}

/// Serialize a collection as pretty-printed JSON.
pub fn export(collection: &RangeCollection) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(collection).map_err(|e| RangeError::Persistence(e.into()))
}

/// File name for an export made on `date`: `poker-ranges-YYYY-MM-DD.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("poker-ranges-{}.json", date.format("%Y-%m-%d"))
}

/// Export into `dir` under today's (UTC) file name, returning the path.
pub fn export_to_dir(collection: &RangeCollection, dir: &Path) -> Result<PathBuf> {
    let bytes = export(collection)?;
    let path = dir.join(export_file_name(Utc::now().date_naive()));

    fs::create_dir_all(dir).map_err(|e| RangeError::Io {
        operation: "create directory",
        path: dir.to_path_buf(),
        source: e,
    })?;
    fs::write(&path, bytes).map_err(|e| RangeError::Io {
        operation: "write",
        path: path.clone(),
        source: e,
    })?;

    log::info!("exported ranges to {}", path.display());
    Ok(path)
}

/// Parse and validate exported bytes.
///
/// Returns only the positions present in the input; nothing has been
/// applied anywhere yet.
pub fn import(bytes: &[u8]) -> Result<StoredRanges> {
    let data: Value = serde_json::from_slice(bytes).map_err(RangeError::MalformedJson)?;
    validate(&data)?;
    serde_json::from_value(data).map_err(RangeError::MalformedJson)
}

/// Read, parse and validate an export file. The file must end in `.json`.
pub fn import_file(path: &Path) -> Result<StoredRanges> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(RangeError::InvalidFileType(path.to_path_buf()));
    }

    let bytes = fs::read(path).map_err(|e| RangeError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    let imported = import(&bytes)?;
    log::info!("read {} positions from {}", imported.len(), path.display());
    Ok(imported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranges::Range;
    use serde_json::json;
    use tempfile::tempdir;

    fn sample() -> RangeCollection {
        let mut collection = RangeCollection::new();
        collection.replace(
            Position::BTN,
            Range::new()
                .with("AA".parse().unwrap(), Action::Raise)
                .with("AKs".parse().unwrap(), Action::Raise)
                .with("76s".parse().unwrap(), Action::Call),
        );
        collection.replace(Position::BB, Range::new().with("72o".parse().unwrap(), Action::Fold));
        collection
    }

    #[test]
    fn test_validate_accepts_good_data() {
        assert!(validate(&json!({})).is_ok());
        assert!(validate(&json!({ "BTN": { "AA": "RAISE", "T9o": "FOLD" }, "SB": {} })).is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_position() {
        let err = validate(&json!({ "XX": {} })).unwrap_err();
        assert!(matches!(err, RangeError::InvalidPosition(ref p) if p == "XX"));
        assert!(err.to_string().contains("XX"));
    }

    #[test]
    fn test_validate_rejects_unknown_action() {
        let err = validate(&json!({ "BTN": { "AA": "BET" } })).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("BET"));
        assert!(message.contains("AA"));
        assert!(matches!(err, RangeError::InvalidAction { .. }));
    }

    #[test]
    fn test_validate_rejects_non_string_and_null_actions() {
        let err = validate(&json!({ "CO": { "KK": null } })).unwrap_err();
        assert!(matches!(err, RangeError::InvalidAction { ref action, .. } if action == "null"));

        let err = validate(&json!({ "CO": { "KK": 3 } })).unwrap_err();
        assert!(matches!(err, RangeError::InvalidAction { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_shapes() {
        assert!(matches!(
            validate(&json!([1, 2])).unwrap_err(),
            RangeError::InvalidFormat { position: None }
        ));
        assert!(matches!(
            validate(&json!({ "HJ": "RAISE" })).unwrap_err(),
            RangeError::InvalidFormat { position: Some(Position::HJ) }
        ));
    }

    #[test]
    fn test_validate_rejects_bad_hand() {
        let err = validate(&json!({ "LJ": { "KAs": "RAISE" } })).unwrap_err();
        assert!(matches!(err, RangeError::InvalidHandFormat { ref hand, .. } if hand == "KAs"));
    }

    #[test]
    fn test_action_checked_before_hand_format() {
        let err = validate(&json!({ "LJ": { "XYZ": "BET" } })).unwrap_err();
        assert!(matches!(err, RangeError::InvalidAction { .. }));
    }

    #[test]
    fn test_export_is_pretty_and_complete() {
        let text = String::from_utf8(export(&sample()).unwrap()).unwrap();
        assert!(text.contains("\n  \"BTN\": {"));
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 6);
        assert_eq!(value["BTN"]["AKs"], "RAISE");
    }

    #[test]
    fn test_round_trip() {
        let collection = sample();
        let imported = import(&export(&collection).unwrap()).unwrap();
        assert_eq!(RangeCollection::from(imported), collection);
    }

    #[test]
    fn test_import_malformed_json() {
        assert!(matches!(import(b"{not json"), Err(RangeError::MalformedJson(_))));
    }

    #[test]
    fn test_import_returns_only_present_positions() {
        let imported = import(br#"{ "CO": { "QQ": "CALL" } }"#).unwrap();
        assert_eq!(imported.len(), 1);
        assert!(imported.contains_key(&Position::CO));
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(export_file_name(date), "poker-ranges-2024-03-07.json");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = export_to_dir(&sample(), dir.path()).unwrap();
        assert!(path.file_name().unwrap().to_str().unwrap().starts_with("poker-ranges-"));

        let imported = import_file(&path).unwrap();
        assert_eq!(RangeCollection::from(imported), sample());
    }

    #[test]
    fn test_import_file_requires_json_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ranges.txt");
        fs::write(&path, "{}").unwrap();
        assert!(matches!(import_file(&path), Err(RangeError::InvalidFileType(_))));
    }

    #[test]
    fn test_import_file_missing() {
        let dir = tempdir().unwrap();
        let err = import_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, RangeError::Io { operation: "read", .. }));
    }
}
