//! Cleaned dataset CSV writer

use crate::app::models::{SourceSchema, TripRecord};
use crate::constants::TIMESTAMP_FORMAT;
use crate::{Error, Result};
use std::path::Path;
use tracing::info;

use super::columns::{ColumnSpec, output_columns};

/// Write the cleaned dataset to a CSV file
///
/// Columns follow the canonical order from [`output_columns`]; records are
/// written in the order given (the pipeline has already sorted them). Null
/// fields become empty cells.
pub fn write_cleaned_csv(
    records: &[TripRecord],
    schema: &SourceSchema,
    path: &Path,
) -> Result<()> {
    let columns = output_columns(schema);

    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        Error::csv_parsing(
            path.display().to_string(),
            "Failed to create CSV writer",
            Some(e),
        )
    })?;

    writer
        .write_record(columns.iter().map(|c| c.name))
        .map_err(|e| {
            Error::csv_parsing(path.display().to_string(), "Failed to write header", Some(e))
        })?;

    for record in records {
        let row: Vec<String> = columns.iter().map(|c| field_value(record, c)).collect();
        writer.write_record(&row).map_err(|e| {
            Error::csv_parsing(path.display().to_string(), "Failed to write record", Some(e))
        })?;
    }

    writer
        .flush()
        .map_err(|e| Error::io("Failed to flush cleaned dataset", e))?;

    info!(
        "Wrote {} cleaned records to {}",
        records.len(),
        path.display()
    );
    Ok(())
}

/// Format one output cell for a record
fn field_value(record: &TripRecord, column: &ColumnSpec) -> String {
    match column.name {
        "id" => text(&record.id),
        "vendor_id" => text(&record.vendor_id),
        "pickup_datetime" => datetime(&record.pickup_datetime),
        "dropoff_datetime" => datetime(&record.dropoff_datetime),
        "passenger_count" => integer_cast(&record.passenger_count),
        "trip_distance" => float(&record.trip_distance),
        "fare_amount" => float(&record.fare_amount),
        "tip_amount" => float(&record.tip_amount),
        "pickup_longitude" => float(&record.pickup_longitude),
        "pickup_latitude" => float(&record.pickup_latitude),
        "dropoff_longitude" => float(&record.dropoff_longitude),
        "dropoff_latitude" => float(&record.dropoff_latitude),
        "store_and_fwd_flag" => text(&record.store_and_fwd_flag),
        "trip_duration_seconds" => float(&record.trip_duration_seconds),
        "trip_distance_km" => float(&record.trip_distance_km),
        "trip_speed_kmh" => float(&record.trip_speed_kmh),
        "fare_per_km" => float(&record.fare_per_km),
        "hour_of_day" => unsigned(&record.hour_of_day),
        "day_of_week" => unsigned(&record.day_of_week),
        "time_period" => record
            .time_period
            .map(|p| p.as_str().to_string())
            .unwrap_or_default(),
        "distance_category" => record
            .distance_category
            .map(|c| c.as_str().to_string())
            .unwrap_or_default(),
        "tip_percentage" => float(&record.tip_percentage),
        "is_rush_hour" => boolean(&record.is_rush_hour),
        "is_weekend" => boolean(&record.is_weekend),
        _ => String::new(),
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn datetime(value: &Option<chrono::DateTime<chrono::Utc>>) -> String {
    value
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

fn float(value: &Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn integer_cast(value: &Option<f64>) -> String {
    value.map(|v| (v as i64).to_string()).unwrap_or_default()
}

fn unsigned(value: &Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn boolean(value: &Option<bool>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
