//! Application constants for the trip processor
//!
//! This module contains the validation bounds, derivation thresholds,
//! and column definitions used throughout the cleaning pipeline.

// =============================================================================
// Column Names
// =============================================================================

/// Columns that must be present in the source schema (fatal if absent)
pub const REQUIRED_COLUMNS: &[&str] = &[
    "pickup_datetime",
    "dropoff_datetime",
    "pickup_longitude",
    "pickup_latitude",
    "dropoff_longitude",
    "dropoff_latitude",
];

/// Optional columns recognised in the source schema
pub const OPTIONAL_COLUMNS: &[&str] = &[
    "id",
    "vendor_id",
    "passenger_count",
    "trip_distance",
    "fare_amount",
    "tip_amount",
    "store_and_fwd_flag",
];

/// Timestamp format used by raw trip files
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Validity Bounds
// =============================================================================

/// Geographic and numeric plausibility bounds for trip records
///
/// Records violating any applicable bound are excluded by the validity filter.
/// The bounding box covers the NYC metropolitan area; coordinates of exactly
/// zero are a sentinel for a missing GPS fix.
pub mod bounds {
    /// Minimum plausible latitude (southern edge of the NYC box)
    pub const MIN_LATITUDE: f64 = 40.5;

    /// Maximum plausible latitude (northern edge of the NYC box)
    pub const MAX_LATITUDE: f64 = 41.0;

    /// Minimum plausible longitude (western edge of the NYC box)
    pub const MIN_LONGITUDE: f64 = -74.3;

    /// Maximum plausible longitude (eastern edge of the NYC box)
    pub const MAX_LONGITUDE: f64 = -73.7;

    /// Maximum trip duration in seconds (24 hours)
    pub const MAX_DURATION_SECONDS: f64 = 86_400.0;

    /// Maximum trip distance in miles
    pub const MAX_DISTANCE_MILES: f64 = 100.0;

    /// Maximum fare amount in dollars
    pub const MAX_FARE_AMOUNT: f64 = 500.0;

    /// Maximum passenger count
    pub const MAX_PASSENGER_COUNT: f64 = 7.0;

    /// Speed above which a derived value is physically implausible (km/h)
    pub const MAX_PLAUSIBLE_SPEED_KMH: f64 = 120.0;
}

// =============================================================================
// Feature Derivation
// =============================================================================

/// Statute miles to kilometres conversion factor
pub const MILES_TO_KM: f64 = 1.60934;

/// Time-period bucket boundaries (hour of day, half-open ranges)
pub mod time_period {
    /// Morning starts at 06:00
    pub const MORNING_START: u32 = 6;

    /// Afternoon starts at 12:00
    pub const AFTERNOON_START: u32 = 12;

    /// Evening starts at 18:00
    pub const EVENING_START: u32 = 18;

    /// Night starts at 22:00
    pub const EVENING_END: u32 = 22;
}

/// Distance category thresholds in miles (strictly increasing, first match wins)
pub mod distance_category {
    /// Below this: very_short
    pub const VERY_SHORT_BELOW: f64 = 1.0;

    /// Below this: short
    pub const SHORT_BELOW: f64 = 3.0;

    /// Below this: medium; at or above: long
    pub const MEDIUM_BELOW: f64 = 10.0;
}

/// Hours of day counted as rush hour (morning and evening peaks)
pub const RUSH_HOURS: &[u32] = &[7, 8, 17, 18];

/// Weekend day-of-week indices (Monday = 0, so Saturday = 5, Sunday = 6)
pub const WEEKEND_DAYS: &[u32] = &[5, 6];

// =============================================================================
// Normalization and Output
// =============================================================================

/// Decimal places for numeric fields in the final dataset
pub const ROUND_DECIMALS: u32 = 4;

/// Decimal places for the tip percentage feature
pub const TIP_PERCENTAGE_DECIMALS: u32 = 2;

/// Imputed passenger count for records missing the field
pub const DEFAULT_PASSENGER_COUNT: f64 = 1.0;

/// Maximum number of record snapshots persisted in the exclusion log
pub const EXCLUSION_LOG_LIMIT: usize = 1000;

/// Default output file names
pub const CLEANED_DATA_FILENAME: &str = "cleaned_trips.csv";
pub const EXCLUSION_LOG_FILENAME: &str = "excluded_records.json";
pub const CLEANING_REPORT_FILENAME: &str = "cleaning_report.json";
