//! Lenient per-cell parsing utilities for raw trip records
//!
//! Every parser here returns `Option` rather than `Result`: a cell that is
//! missing, empty, or unparseable yields `None`, and the record travels on to
//! the cleaning pipeline which decides its fate. Row-level defects are never
//! raised as errors.

use super::column_mapping::ColumnMapping;
use crate::constants::TIMESTAMP_FORMAT;
use chrono::{DateTime, NaiveDateTime, Utc};
use csv::StringRecord;
use tracing::debug;

/// Parse an optional datetime cell ("YYYY-MM-DD HH:MM:SS", assumed UTC)
pub fn parse_optional_datetime(
    record: &StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Option<DateTime<Utc>> {
    let value = get_optional_field(record, mapping, field_name)?;

    match NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT) {
        Ok(naive) => Some(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc)),
        Err(_) => {
            debug!(
                "Failed to parse datetime '{}' = '{}', deferring to pipeline",
                field_name, value
            );
            None
        }
    }
}

/// Parse an optional floating point cell
pub fn parse_optional_f64(
    record: &StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Option<f64> {
    let value = get_optional_field(record, mapping, field_name)?;

    match value.parse::<f64>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            debug!(
                "Failed to parse number '{}' = '{}', deferring to pipeline",
                field_name, value
            );
            None
        }
    }
}

/// Parse an optional text cell
pub fn parse_optional_string(
    record: &StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Option<String> {
    get_optional_field(record, mapping, field_name).map(|s| s.to_string())
}

/// Get an optional trimmed cell value from a CSV record
pub fn get_optional_field<'a>(
    record: &'a StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Option<&'a str> {
    mapping
        .name_to_index
        .get(field_name)
        .and_then(|&index| record.get(index))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}
