//! Tests for first-seen-wins deduplication

use super::{create_distinct_record, create_valid_record, ts};
use crate::app::services::trip_pipeline::deduplication::{
    TripKey, are_duplicates, deduplicate_trips,
};
use crate::app::services::trip_pipeline::exclusion::ExclusionLog;
use crate::app::services::trip_pipeline::stats::CleaningStats;

#[test]
fn test_no_duplicates_all_survive() {
    let mut exclusions = ExclusionLog::new();
    let mut stats = CleaningStats::new();

    let records = vec![
        create_distinct_record("a", 0),
        create_distinct_record("b", 1),
        create_distinct_record("c", 2),
    ];

    let survivors = deduplicate_trips(records, &mut exclusions, &mut stats, None);

    assert_eq!(survivors.len(), 3);
    assert_eq!(stats.duplicates_removed, 0);
}

#[test]
fn test_first_occurrence_wins() {
    let mut exclusions = ExclusionLog::new();
    let mut stats = CleaningStats::new();

    // Identical identity key, different payloads: the first in input order
    // must be the one retained.
    let mut first = create_valid_record("first");
    first.fare_amount = Some(10.0);
    let mut second = create_valid_record("second");
    second.fare_amount = Some(99.0);

    let survivors = deduplicate_trips(vec![first, second], &mut exclusions, &mut stats, None);

    assert_eq!(survivors.len(), 1);
    assert_eq!(survivors[0].id.as_deref(), Some("first"));
    assert_eq!(survivors[0].fare_amount, Some(10.0));
    assert_eq!(stats.duplicates_removed, 1);
    assert_eq!(exclusions.count(), 1);
    assert_eq!(exclusions.snapshots()[0]["id"], "second");
}

#[test]
fn test_key_ignores_dropoff_coordinates() {
    let mut exclusions = ExclusionLog::new();
    let mut stats = CleaningStats::new();

    // Same pickup time/place and dropoff time, different dropoff location:
    // still duplicates under the identity key.
    let first = create_valid_record("a");
    let mut second = create_valid_record("b");
    second.dropoff_longitude = Some(-73.90);
    second.dropoff_latitude = Some(40.80);

    let survivors = deduplicate_trips(vec![first, second], &mut exclusions, &mut stats, None);

    assert_eq!(survivors.len(), 1);
    assert_eq!(survivors[0].id.as_deref(), Some("a"));
}

#[test]
fn test_differing_key_fields_are_not_duplicates() {
    let base = create_valid_record("a");

    let mut other_time = create_valid_record("b");
    other_time.pickup_datetime = Some(ts(15, 0, 0));
    assert!(!are_duplicates(&base, &other_time));

    let mut other_lon = create_valid_record("c");
    other_lon.pickup_longitude = Some(-73.99);
    assert!(!are_duplicates(&base, &other_lon));

    let mut other_lat = create_valid_record("d");
    other_lat.pickup_latitude = Some(40.70);
    assert!(!are_duplicates(&base, &other_lat));

    let mut other_dropoff = create_valid_record("e");
    other_dropoff.dropoff_datetime = Some(ts(16, 0, 0));
    assert!(!are_duplicates(&base, &other_dropoff));

    assert!(are_duplicates(&base, &create_valid_record("f")));
}

#[test]
fn test_interleaved_duplicates() {
    let mut exclusions = ExclusionLog::new();
    let mut stats = CleaningStats::new();

    let records = vec![
        create_distinct_record("a1", 0),
        create_distinct_record("b1", 1),
        create_distinct_record("a2", 0), // duplicate of a1
        create_distinct_record("c1", 2),
        create_distinct_record("b2", 1), // duplicate of b1
        create_distinct_record("a3", 0), // duplicate of a1
    ];

    let survivors = deduplicate_trips(records, &mut exclusions, &mut stats, None);

    let ids: Vec<&str> = survivors.iter().map(|r| r.id.as_deref().unwrap()).collect();
    assert_eq!(ids, vec!["a1", "b1", "c1"]);
    assert_eq!(stats.duplicates_removed, 3);
}

#[test]
fn test_survivors_keep_input_order() {
    let mut exclusions = ExclusionLog::new();
    let mut stats = CleaningStats::new();

    let records = vec![
        create_distinct_record("z", 5),
        create_distinct_record("m", 3),
        create_distinct_record("a", 9),
    ];

    let survivors = deduplicate_trips(records, &mut exclusions, &mut stats, None);

    let ids: Vec<&str> = survivors.iter().map(|r| r.id.as_deref().unwrap()).collect();
    assert_eq!(ids, vec!["z", "m", "a"]);
}

#[test]
fn test_key_requires_exact_coordinate_equality() {
    let base = create_valid_record("a");
    let mut near = create_valid_record("b");
    near.pickup_longitude = Some(-73.982_100_000_001);

    assert!(TripKey::from_record(&base).is_some());
    assert!(!are_duplicates(&base, &near));
}

#[test]
fn test_empty_input() {
    let mut exclusions = ExclusionLog::new();
    let mut stats = CleaningStats::new();

    let survivors = deduplicate_trips(vec![], &mut exclusions, &mut stats, None);

    assert!(survivors.is_empty());
    assert_eq!(stats.duplicates_removed, 0);
}
