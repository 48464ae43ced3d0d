//! Versioned on-disk format for menu snapshots
//!
//! Entries are JSON documents carrying a schema version next to the snapshot
//! fields, so older or newer files are recognized instead of misread.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::MenuSnapshot;

/// Current schema version written by `encode`
pub const SCHEMA_VERSION: u32 = 1;

/// Errors that can occur when decoding a cache entry
#[derive(Debug, Error)]
pub enum CacheDecodeError {
    /// Entry is not valid JSON for the expected schema
    #[error("Malformed cache entry: {0}")]
    Json(#[from] serde_json::Error),

    /// Entry was written with a schema this build does not understand
    #[error("Unsupported cache schema version {0}")]
    UnsupportedVersion(u32),

    /// Entry content belongs to a different day than its file name
    #[error("Cache entry for {expected} contains the menu of {found}")]
    DateMismatch { expected: NaiveDate, found: NaiveDate },

    /// Entry could not be read
    #[error("Failed to read cache entry: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
struct EntryRef<'a> {
    version: u32,
    #[serde(flatten)]
    snapshot: &'a MenuSnapshot,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

#[derive(Deserialize)]
struct Entry {
    #[allow(dead_code)]
    version: u32,
    #[serde(flatten)]
    snapshot: MenuSnapshot,
}

/// Encodes a snapshot as a versioned JSON document
pub fn encode(snapshot: &MenuSnapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&EntryRef {
        version: SCHEMA_VERSION,
        snapshot,
    })
}

/// Decodes a versioned JSON document into a snapshot
pub fn decode(content: &str) -> Result<MenuSnapshot, CacheDecodeError> {
    let probe: VersionProbe = serde_json::from_str(content)?;
    if probe.version != SCHEMA_VERSION {
        return Err(CacheDecodeError::UnsupportedVersion(probe.version));
    }

    let entry: Entry = serde_json::from_str(content)?;
    Ok(entry.snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Meal, Restaurant};

    fn sample_snapshot() -> MenuSnapshot {
        MenuSnapshot::new(
            NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            vec![
                Restaurant::new("Delica", vec![Meal::new("Soup", "2,50")]),
                Restaurant::new(
                    "Brygge",
                    vec![Meal::new("Fish Soup", "3,00"), Meal::new("Salad", "2,00")],
                ),
                Restaurant::new("Dental", vec![]),
            ],
        )
    }

    #[test]
    fn test_encoded_entry_has_version_and_fields() {
        let json = encode(&sample_snapshot()).unwrap();

        assert!(json.contains("\"version\": 1"));
        assert!(json.contains("\"date\": \"2024-09-02\""));
        assert!(json.contains("\"restaurants\""));
        assert!(json.contains("\"meals\": []"));
        assert!(json.contains("\"price\": \"2,50\""));
    }

    #[test]
    fn test_decode_restores_snapshot() {
        let snapshot = sample_snapshot();
        let decoded = decode(&encode(&snapshot).unwrap()).unwrap();

        assert_eq!(decoded, snapshot);
        assert_eq!(decoded.restaurants[1].meals[1].name, "Salad");
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        let json = r#"{"version": 2, "date": "2024-09-02", "restaurants": []}"#;

        let err = decode(json).unwrap_err();
        assert!(matches!(err, CacheDecodeError::UnsupportedVersion(2)));
    }

    #[test]
    fn test_decode_rejects_missing_version() {
        let json = r#"{"date": "2024-09-02", "restaurants": []}"#;
        assert!(matches!(decode(json), Err(CacheDecodeError::Json(_))));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode("not json at all").is_err());
        assert!(decode(r#"{"version": 1, "date": "yesterday", "restaurants": []}"#).is_err());
    }
}
