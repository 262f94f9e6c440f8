//! Column decoding shared by the repositories.
//!
//! Timestamps arrive in two shapes: RFC 3339 from rows written by this crate
//! and `YYYY-MM-DD HH:MM:SS` from SQLite's `datetime('now')` column defaults.

use chrono::{DateTime, NaiveDateTime, Utc};
use urlpath_core::entities::EntityData;

use crate::error::DatabaseError;

const SQLITE_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

/// # Errors
///
/// Returns `DatabaseError::Row` if `s` matches neither timestamp shape.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(s, SQLITE_DATETIME).map(|n| n.and_utc()))
        .map_err(|e| DatabaseError::Row(format!("timestamp '{s}': {e}")))
}

/// Nullable TEXT column; an empty string reads as `None`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column cannot be read as text.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    Ok(row
        .get::<Option<String>>(idx)?
        .filter(|s| !s.is_empty()))
}

/// INTEGER 0/1 column.
///
/// # Errors
///
/// Returns `DatabaseError` if the column cannot be read as an integer.
pub fn get_bool(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(row.get::<i64>(idx)? != 0)
}

/// Decode the JSON `data` column of `content_entities`.
///
/// # Errors
///
/// Returns `DatabaseError::Row` unless the text is a JSON object.
pub fn parse_entity_data(s: &str) -> Result<EntityData, DatabaseError> {
    let value: serde_json::Value =
        serde_json::from_str(s).map_err(|e| DatabaseError::Row(format!("entity data: {e}")))?;
    EntityData::from_value(value).map_err(|e| DatabaseError::Row(e.to_string()))
}

/// # Errors
///
/// Returns `DatabaseError::Encode` if serialization fails.
pub fn entity_data_to_json(data: &EntityData) -> Result<String, DatabaseError> {
    Ok(serde_json::to_string(data)?)
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn reads_both_timestamp_shapes() {
        let ours = parse_datetime("2026-10-18T09:15:00+02:00").unwrap();
        let sqlite = parse_datetime("2026-10-18 07:15:00").unwrap();
        assert_eq!(ours, sqlite);
        assert_eq!((sqlite.day(), sqlite.hour()), (18, 7));
    }

    #[test]
    fn rejects_unknown_timestamps() {
        assert!(matches!(parse_datetime("yesterday"), Err(DatabaseError::Row(_))));
    }

    #[test]
    fn entity_data_must_be_an_object() {
        assert!(parse_entity_data(r#"{"title":"x"}"#).is_ok());
        assert!(parse_entity_data("[1]").is_err());
        assert!(parse_entity_data("{").is_err());
    }
}
