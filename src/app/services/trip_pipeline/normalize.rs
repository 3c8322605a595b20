//! Final normalization: rounding, casting, and canonical ordering
//!
//! Rounds every numeric field except the passenger count to the storage
//! precision, truncates the passenger count to a whole number, and sorts the
//! working set by pickup timestamp ascending. The sort is stable, so records
//! sharing a pickup timestamp keep their prior relative order.

use crate::app::models::TripRecord;
use crate::constants::ROUND_DECIMALS;
use tracing::info;

use super::features::round_to;
use super::stats::CleaningStats;

/// Normalize all records and establish the canonical output order
///
/// Sets `final_count` on the statistics accumulator.
pub fn normalize_records(records: &mut Vec<TripRecord>, stats: &mut CleaningStats) {
    for record in records.iter_mut() {
        normalize_record(record);
    }

    // Vec::sort_by is stable; ties keep input-relative order
    records.sort_by(|a, b| a.pickup_datetime.cmp(&b.pickup_datetime));

    stats.final_count = records.len();

    info!(
        "Normalization complete: {} records in canonical order",
        records.len()
    );
}

/// Round the numeric fields of one record to storage precision
pub fn normalize_record(record: &mut TripRecord) {
    record.pickup_longitude = record.pickup_longitude.map(round4);
    record.pickup_latitude = record.pickup_latitude.map(round4);
    record.dropoff_longitude = record.dropoff_longitude.map(round4);
    record.dropoff_latitude = record.dropoff_latitude.map(round4);
    record.trip_distance = record.trip_distance.map(round4);
    record.fare_amount = record.fare_amount.map(round4);
    record.tip_amount = record.tip_amount.map(round4);
    record.trip_duration_seconds = record.trip_duration_seconds.map(round4);
    record.trip_distance_km = record.trip_distance_km.map(round4);
    record.trip_speed_kmh = record.trip_speed_kmh.map(round4);
    record.fare_per_km = record.fare_per_km.map(round4);
    record.tip_percentage = record.tip_percentage.map(round4);

    // Cast semantics, not rounding: 1.9 passengers would store as 1
    record.passenger_count = record.passenger_count.map(f64::trunc);
}

fn round4(value: f64) -> f64 {
    round_to(value, ROUND_DECIMALS)
}
