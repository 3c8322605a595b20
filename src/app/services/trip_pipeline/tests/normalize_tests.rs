//! Tests for normalization and canonical ordering

use super::{create_valid_record, ts};
use crate::app::services::trip_pipeline::normalize::{normalize_record, normalize_records};
use crate::app::services::trip_pipeline::stats::CleaningStats;

#[test]
fn test_numeric_fields_rounded_to_four_decimals() {
    let mut record = create_valid_record("a");
    record.pickup_longitude = Some(-73.982_139_99);
    record.pickup_latitude = Some(40.767_912_34);
    record.trip_duration_seconds = Some(600.123_456);
    record.trip_speed_kmh = Some(14.484_060_9);
    record.fare_per_km = Some(3.521_098_7);

    normalize_record(&mut record);

    assert_eq!(record.pickup_longitude, Some(-73.9821));
    assert_eq!(record.pickup_latitude, Some(40.7679));
    assert_eq!(record.trip_duration_seconds, Some(600.1235));
    assert_eq!(record.trip_speed_kmh, Some(14.4841));
    assert_eq!(record.fare_per_km, Some(3.5211));
}

#[test]
fn test_passenger_count_cast_to_whole_number() {
    let mut record = create_valid_record("a");
    record.passenger_count = Some(2.0);
    normalize_record(&mut record);
    assert_eq!(record.passenger_count, Some(2.0));

    // Cast truncates rather than rounds
    let mut record = create_valid_record("b");
    record.passenger_count = Some(1.9);
    normalize_record(&mut record);
    assert_eq!(record.passenger_count, Some(1.0));
}

#[test]
fn test_null_fields_stay_null() {
    let mut record = create_valid_record("a");
    record.trip_speed_kmh = None;
    record.fare_per_km = None;

    normalize_record(&mut record);

    assert!(record.trip_speed_kmh.is_none());
    assert!(record.fare_per_km.is_none());
}

#[test]
fn test_sorted_by_pickup_ascending() {
    let mut late = create_valid_record("late");
    late.pickup_datetime = Some(ts(18, 0, 0));

    let mut early = create_valid_record("early");
    early.pickup_datetime = Some(ts(6, 0, 0));

    let mut middle = create_valid_record("middle");
    middle.pickup_datetime = Some(ts(12, 0, 0));

    let mut records = vec![late, early, middle];
    let mut stats = CleaningStats::new();
    normalize_records(&mut records, &mut stats);

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_deref().unwrap()).collect();
    assert_eq!(ids, vec!["early", "middle", "late"]);
    assert_eq!(stats.final_count, 3);
}

#[test]
fn test_sort_is_stable_on_equal_timestamps() {
    // Three records at the same pickup instant keep their input order
    let records_in: Vec<_> = ["a", "b", "c"]
        .iter()
        .map(|id| create_valid_record(id))
        .collect();

    let mut records = records_in;
    let mut stats = CleaningStats::new();
    normalize_records(&mut records, &mut stats);

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_deref().unwrap()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn test_final_count_set() {
    let mut records = vec![create_valid_record("a"), create_valid_record("b")];
    let mut stats = CleaningStats::new();

    normalize_records(&mut records, &mut stats);
    assert_eq!(stats.final_count, 2);

    let mut empty: Vec<crate::app::models::TripRecord> = vec![];
    let mut stats = CleaningStats::new();
    normalize_records(&mut empty, &mut stats);
    assert_eq!(stats.final_count, 0);
}
