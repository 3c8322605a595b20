//! Validity filtering for trip records
//!
//! Computes the trip duration and excludes records that fall outside the
//! plausibility envelope: non-positive or day-plus durations, coordinates
//! outside the configured bounding box or exactly zero (a missing-GPS
//! sentinel), and out-of-range distances, fares, and passenger counts.
//! Optional-field conditions apply only when the source schema carries the
//! column, and a missing value in a present column is not itself a violation.

use crate::app::models::{SourceSchema, TripRecord};
use crate::config::ValidationConfig;
use indicatif::ProgressBar;
use tracing::info;

use super::exclusion::ExclusionLog;
use super::stats::CleaningStats;

/// Compute durations and remove implausible records
///
/// # Arguments
///
/// * `records` - Input records (critical fields guaranteed present)
/// * `schema` - Source schema capability descriptor
/// * `validation` - Plausibility bounds
/// * `exclusions` - Shared exclusion log
/// * `stats` - Mutable statistics accumulator
/// * `progress_bar` - Optional progress bar for tracking progress
///
/// # Returns
///
/// Surviving records with `trip_duration_seconds` populated
pub fn apply_validity_filters(
    records: Vec<TripRecord>,
    schema: &SourceSchema,
    validation: &ValidationConfig,
    exclusions: &mut ExclusionLog,
    stats: &mut CleaningStats,
    progress_bar: Option<&ProgressBar>,
) -> Vec<TripRecord> {
    let initial_count = records.len();
    let mut survivors = Vec::with_capacity(initial_count);

    for mut record in records {
        if let Some(pb) = progress_bar {
            pb.inc(1);
        }

        compute_duration(&mut record);

        if is_valid(&record, schema, validation) {
            survivors.push(record);
        } else {
            exclusions.record(&record);
        }
    }

    stats.outliers_removed = initial_count - survivors.len();

    info!(
        "Validity filtering complete: {} -> {} records ({} outliers removed)",
        initial_count,
        survivors.len(),
        stats.outliers_removed
    );

    survivors
}

/// Derive the trip duration in fractional seconds from the timestamp pair
pub fn compute_duration(record: &mut TripRecord) {
    if let (Some(pickup), Some(dropoff)) = (record.pickup_datetime, record.dropoff_datetime) {
        let millis = (dropoff - pickup).num_milliseconds();
        record.trip_duration_seconds = Some(millis as f64 / 1000.0);
    }
}

/// Check a record against every applicable plausibility condition
///
/// Conditions combine with logical OR: any single violation excludes the
/// record.
pub fn is_valid(record: &TripRecord, schema: &SourceSchema, validation: &ValidationConfig) -> bool {
    if violates_duration(record, validation) {
        return false;
    }

    if violates_bounding_box(record, validation) {
        return false;
    }

    if schema.has_trip_distance && violates_distance(record, validation) {
        return false;
    }

    if schema.has_fare_amount && violates_fare(record, validation) {
        return false;
    }

    if schema.has_passenger_count && violates_passenger_count(record, validation) {
        return false;
    }

    true
}

/// Duration must be strictly positive and at most the configured maximum
fn violates_duration(record: &TripRecord, validation: &ValidationConfig) -> bool {
    match record.trip_duration_seconds {
        Some(duration) => duration <= 0.0 || duration > validation.max_duration_seconds,
        None => true,
    }
}

/// All four coordinates must fall inside the bounding box and be non-zero
fn violates_bounding_box(record: &TripRecord, validation: &ValidationConfig) -> bool {
    let coordinates = [
        (record.pickup_latitude, record.pickup_longitude),
        (record.dropoff_latitude, record.dropoff_longitude),
    ];

    for (latitude, longitude) in coordinates {
        let (Some(lat), Some(lon)) = (latitude, longitude) else {
            return true;
        };

        if lat < validation.min_latitude || lat > validation.max_latitude {
            return true;
        }

        if lon < validation.min_longitude || lon > validation.max_longitude {
            return true;
        }

        if lat == 0.0 || lon == 0.0 {
            return true;
        }
    }

    false
}

/// Distance, when present, must be in (0, max]
fn violates_distance(record: &TripRecord, validation: &ValidationConfig) -> bool {
    match record.trip_distance {
        Some(distance) => distance <= 0.0 || distance > validation.max_distance_miles,
        None => false,
    }
}

/// Fare, when present, must be in [0, max]
fn violates_fare(record: &TripRecord, validation: &ValidationConfig) -> bool {
    match record.fare_amount {
        Some(fare) => fare < 0.0 || fare > validation.max_fare_amount,
        None => false,
    }
}

/// Passenger count, when present, must be in [1, max]
fn violates_passenger_count(record: &TripRecord, validation: &ValidationConfig) -> bool {
    match record.passenger_count {
        Some(count) => count <= 0.0 || count > validation.max_passenger_count,
        None => false,
    }
}
