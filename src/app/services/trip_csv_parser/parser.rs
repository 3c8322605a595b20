//! Core parsing orchestration for raw trip files

use crate::app::models::TripRecord;
use crate::{Error, Result};
use csv::{ReaderBuilder, StringRecord};
use std::path::Path;
use tracing::{debug, info};

use super::column_mapping::ColumnMapping;
use super::field_parsers::{parse_optional_datetime, parse_optional_f64, parse_optional_string};
use super::stats::{ParseResult, ParseStats};

/// Parser for raw taxi trip CSV files
///
/// Loads an entire file into memory as a vector of [`TripRecord`], preserving
/// input order. Field typing is column-driven: numeric columns parse as
/// floats, timestamp columns as UTC datetimes, everything else as text.
///
/// # Example
///
/// ```rust,no_run
/// use trip_processor::app::services::trip_csv_parser::TripCsvParser;
///
/// # fn example() -> trip_processor::Result<()> {
/// let parser = TripCsvParser::new();
/// let result = parser.parse_file(std::path::Path::new("train.csv"))?;
/// println!("Loaded {} trip records", result.record_count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct TripCsvParser;

impl TripCsvParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a raw trip file into records plus the resolved source schema
    ///
    /// # Errors
    ///
    /// Fails on structural defects only: the file cannot be opened, the CSV
    /// stream is unreadable, or a required column is missing from the header.
    pub fn parse_file(&self, path: &Path) -> Result<ParseResult> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let file_name = path.display().to_string();
        info!("Loading raw trip data from {}", file_name);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| Error::csv_parsing(&file_name, "Failed to open CSV reader", Some(e)))?;

        let headers = reader
            .headers()
            .map_err(|e| Error::csv_parsing(&file_name, "Failed to read header row", Some(e)))?
            .clone();

        let mapping = ColumnMapping::analyze(&headers, &file_name)?;
        debug!(
            "Resolved source schema from {} columns: {:?}",
            mapping.column_count(),
            mapping.schema
        );

        let mut records = Vec::new();
        for row in reader.records() {
            let row =
                row.map_err(|e| Error::csv_parsing(&file_name, "Failed to read record", Some(e)))?;
            records.push(parse_trip_record(&row, &mapping));
        }

        let stats = ParseStats {
            total_rows: records.len(),
            columns_detected: mapping.column_count(),
        };

        info!("Loaded {} records from {}", records.len(), file_name);

        Ok(ParseResult {
            records,
            schema: mapping.schema,
            stats,
        })
    }
}

/// Build a single trip record from one CSV row
///
/// Unusable cells become `None`; the record itself is always produced so the
/// pipeline can account for its exclusion later.
fn parse_trip_record(row: &StringRecord, mapping: &ColumnMapping) -> TripRecord {
    let mut record = TripRecord::empty();

    record.id = parse_optional_string(row, mapping, "id");
    record.vendor_id = parse_optional_string(row, mapping, "vendor_id");
    record.pickup_datetime = parse_optional_datetime(row, mapping, "pickup_datetime");
    record.dropoff_datetime = parse_optional_datetime(row, mapping, "dropoff_datetime");
    record.pickup_longitude = parse_optional_f64(row, mapping, "pickup_longitude");
    record.pickup_latitude = parse_optional_f64(row, mapping, "pickup_latitude");
    record.dropoff_longitude = parse_optional_f64(row, mapping, "dropoff_longitude");
    record.dropoff_latitude = parse_optional_f64(row, mapping, "dropoff_latitude");
    record.passenger_count = parse_optional_f64(row, mapping, "passenger_count");
    record.trip_distance = parse_optional_f64(row, mapping, "trip_distance");
    record.fare_amount = parse_optional_f64(row, mapping, "fare_amount");
    record.tip_amount = parse_optional_f64(row, mapping, "tip_amount");
    record.store_and_fwd_flag = parse_optional_string(row, mapping, "store_and_fwd_flag");

    record
}
