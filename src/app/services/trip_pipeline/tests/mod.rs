//! Tests for the cleaning pipeline stages and driver

pub mod deduplication_tests;
pub mod normalize_tests;

use crate::app::models::{SourceSchema, TripRecord};
use crate::config::ValidationConfig;
use chrono::{DateTime, TimeZone, Utc};

/// Timestamp helper: a fixed day (2016-03-14, a Monday) at the given time
pub fn ts(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2016, 3, 14, hour, minute, second).unwrap()
}

/// Timestamp helper with an explicit day of March 2016
pub fn ts_on_day(day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2016, 3, day, hour, minute, second).unwrap()
}

/// Schema descriptor for a source carrying every optional column
pub fn full_schema() -> SourceSchema {
    SourceSchema {
        has_id: true,
        has_vendor_id: true,
        has_passenger_count: true,
        has_trip_distance: true,
        has_fare_amount: true,
        has_tip_amount: true,
        has_store_and_fwd_flag: true,
    }
}

/// Schema descriptor for a source carrying only the required columns
pub fn minimal_schema() -> SourceSchema {
    SourceSchema {
        has_id: true,
        ..SourceSchema::default()
    }
}

/// Default validation bounds used across the stage tests
pub fn test_validation() -> ValidationConfig {
    ValidationConfig::default()
}

/// A fully populated, plausible trip record
///
/// Mid-Manhattan coordinates, a 10-minute afternoon trip of 1.5 miles with
/// an $8.50 fare and a $1.00 tip.
pub fn create_valid_record(id: &str) -> TripRecord {
    let mut record = TripRecord::empty();
    record.id = Some(id.to_string());
    record.vendor_id = Some("1".to_string());
    record.pickup_datetime = Some(ts(14, 30, 0));
    record.dropoff_datetime = Some(ts(14, 40, 0));
    record.pickup_longitude = Some(-73.9821);
    record.pickup_latitude = Some(40.7679);
    record.dropoff_longitude = Some(-73.9646);
    record.dropoff_latitude = Some(40.7655);
    record.passenger_count = Some(1.0);
    record.trip_distance = Some(1.5);
    record.fare_amount = Some(8.5);
    record.tip_amount = Some(1.0);
    record.store_and_fwd_flag = Some("N".to_string());
    record
}

/// A valid record with a distinct identity key derived from the index
pub fn create_distinct_record(id: &str, index: u32) -> TripRecord {
    let mut record = create_valid_record(id);
    record.pickup_datetime = Some(ts(10, index, 0));
    record.dropoff_datetime = Some(ts(10, index + 5, 0));
    record
}
