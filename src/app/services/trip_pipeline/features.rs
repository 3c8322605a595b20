//! Derived feature computation for validated trip records
//!
//! Adds the analytical fields the warehouse and dashboard consume: metric
//! distance, speed, fare efficiency, tip percentage, and the temporal
//! buckets. This stage never excludes a record; an uncomputable feature is
//! simply left (or set) to null. Optional-column features are guarded by the
//! source schema descriptor resolved at load time.

use crate::app::models::{DistanceCategory, SourceSchema, TimePeriod, TripRecord};
use crate::config::ValidationConfig;
use crate::constants::{MILES_TO_KM, TIP_PERCENTAGE_DECIMALS};
use chrono::{Datelike, Timelike};
use indicatif::ProgressBar;
use tracing::info;

/// Compute derived features for every record in place
///
/// # Arguments
///
/// * `records` - Validated records (durations populated)
/// * `schema` - Source schema capability descriptor
/// * `validation` - Bounds, for the speed plausibility cap
/// * `progress_bar` - Optional progress bar for tracking progress
pub fn derive_features(
    records: &mut [TripRecord],
    schema: &SourceSchema,
    validation: &ValidationConfig,
    progress_bar: Option<&ProgressBar>,
) {
    for record in records.iter_mut() {
        if let Some(pb) = progress_bar {
            pb.inc(1);
        }

        derive_record_features(record, schema, validation);
    }

    info!("Derived features for {} records", records.len());
}

/// Compute all applicable derived fields for a single record
pub fn derive_record_features(
    record: &mut TripRecord,
    schema: &SourceSchema,
    validation: &ValidationConfig,
) {
    if schema.derives_distance_features() {
        derive_distance_features(record, validation);
    }

    if schema.derives_fare_per_km() {
        record.fare_per_km = compute_fare_per_km(record.fare_amount, record.trip_distance_km);
    }

    if schema.derives_tip_percentage() {
        record.tip_percentage = compute_tip_percentage(record.tip_amount, record.fare_amount);
    }

    derive_temporal_features(record);
}

/// Metric distance, plausibility-capped speed, and the distance bucket
fn derive_distance_features(record: &mut TripRecord, validation: &ValidationConfig) {
    let Some(distance_miles) = record.trip_distance else {
        return;
    };

    let distance_km = distance_miles * MILES_TO_KM;
    record.trip_distance_km = Some(distance_km);
    record.distance_category = Some(DistanceCategory::from_miles(distance_miles));

    record.trip_speed_kmh = record.trip_duration_seconds.and_then(|duration| {
        if duration <= 0.0 {
            return None;
        }
        let speed = distance_km / (duration / 3600.0);
        // A speed past the cap means the distance or the clock is lying;
        // the field is discarded, the record stays.
        if speed > validation.max_plausible_speed_kmh || speed < 0.0 {
            None
        } else {
            Some(speed)
        }
    });
}

/// Fare per kilometre, nulled on a zero distance
fn compute_fare_per_km(fare: Option<f64>, distance_km: Option<f64>) -> Option<f64> {
    let (fare, distance_km) = (fare?, distance_km?);
    if distance_km == 0.0 {
        None
    } else {
        Some(fare / distance_km)
    }
}

/// Tip as a percentage of the fare, forced to zero on zero fares
fn compute_tip_percentage(tip: Option<f64>, fare: Option<f64>) -> Option<f64> {
    match (tip, fare) {
        (_, Some(fare)) if fare == 0.0 => Some(0.0),
        (Some(tip), Some(fare)) => Some(round_to(tip / fare * 100.0, TIP_PERCENTAGE_DECIMALS)),
        _ => None,
    }
}

/// Hour, weekday, time-period bucket, and the rush-hour/weekend flags
fn derive_temporal_features(record: &mut TripRecord) {
    let Some(pickup) = record.pickup_datetime else {
        return;
    };

    let hour = pickup.hour();
    let day = pickup.weekday().num_days_from_monday();

    record.hour_of_day = Some(hour);
    record.day_of_week = Some(day);
    record.time_period = Some(TimePeriod::from_hour(hour));
    record.is_rush_hour = Some(TripRecord::hour_is_rush_hour(hour));
    record.is_weekend = Some(TripRecord::day_is_weekend(day));
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}
