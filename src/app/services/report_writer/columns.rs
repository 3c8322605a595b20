//! Canonical output column list and per-column types
//!
//! The cleaned dataset carries the source columns (those the input actually
//! had) followed by the derived columns, in a fixed order shared by the CSV
//! writer and the cleaning report.

use crate::app::models::SourceSchema;

/// Storage type of an output column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Datetime,
    Float,
    Integer,
    Boolean,
    Category,
}

impl ColumnType {
    /// Type label used in the cleaning report
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Datetime => "datetime",
            ColumnType::Float => "float",
            ColumnType::Integer => "integer",
            ColumnType::Boolean => "boolean",
            ColumnType::Category => "category",
        }
    }
}

/// One output column: name plus inferred type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub dtype: ColumnType,
}

impl ColumnSpec {
    const fn new(name: &'static str, dtype: ColumnType) -> Self {
        Self { name, dtype }
    }
}

/// Build the output column list for a given source schema
///
/// Source columns appear first (in their canonical order, restricted to the
/// columns the input carried), then the derived columns. Distance- and
/// fare-dependent derived columns appear only when their inputs exist.
pub fn output_columns(schema: &SourceSchema) -> Vec<ColumnSpec> {
    let mut columns = Vec::new();

    // Source columns
    if schema.has_id {
        columns.push(ColumnSpec::new("id", ColumnType::Text));
    }
    if schema.has_vendor_id {
        columns.push(ColumnSpec::new("vendor_id", ColumnType::Text));
    }
    columns.push(ColumnSpec::new("pickup_datetime", ColumnType::Datetime));
    columns.push(ColumnSpec::new("dropoff_datetime", ColumnType::Datetime));
    if schema.has_passenger_count {
        columns.push(ColumnSpec::new("passenger_count", ColumnType::Integer));
    }
    if schema.has_trip_distance {
        columns.push(ColumnSpec::new("trip_distance", ColumnType::Float));
    }
    if schema.has_fare_amount {
        columns.push(ColumnSpec::new("fare_amount", ColumnType::Float));
    }
    if schema.has_tip_amount {
        columns.push(ColumnSpec::new("tip_amount", ColumnType::Float));
    }
    columns.push(ColumnSpec::new("pickup_longitude", ColumnType::Float));
    columns.push(ColumnSpec::new("pickup_latitude", ColumnType::Float));
    columns.push(ColumnSpec::new("dropoff_longitude", ColumnType::Float));
    columns.push(ColumnSpec::new("dropoff_latitude", ColumnType::Float));
    if schema.has_store_and_fwd_flag {
        columns.push(ColumnSpec::new("store_and_fwd_flag", ColumnType::Text));
    }

    // Derived columns
    columns.push(ColumnSpec::new("trip_duration_seconds", ColumnType::Float));
    if schema.derives_distance_features() {
        columns.push(ColumnSpec::new("trip_distance_km", ColumnType::Float));
        columns.push(ColumnSpec::new("trip_speed_kmh", ColumnType::Float));
    }
    if schema.derives_fare_per_km() {
        columns.push(ColumnSpec::new("fare_per_km", ColumnType::Float));
    }
    columns.push(ColumnSpec::new("hour_of_day", ColumnType::Integer));
    columns.push(ColumnSpec::new("day_of_week", ColumnType::Integer));
    columns.push(ColumnSpec::new("time_period", ColumnType::Category));
    if schema.derives_distance_features() {
        columns.push(ColumnSpec::new("distance_category", ColumnType::Category));
    }
    if schema.derives_tip_percentage() {
        columns.push(ColumnSpec::new("tip_percentage", ColumnType::Float));
    }
    columns.push(ColumnSpec::new("is_rush_hour", ColumnType::Boolean));
    columns.push(ColumnSpec::new("is_weekend", ColumnType::Boolean));

    columns
}
