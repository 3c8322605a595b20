//! Duplicate removal for trip records
//!
//! Two records are behavioral duplicates when they share the identity key
//! (pickup timestamp, dropoff timestamp, pickup longitude, pickup latitude).
//! The tie-break is strictly first-seen-wins: the earliest occurrence in
//! input order is kept and every later occurrence is excluded, so the scan
//! must preserve input order rather than group-and-select.

use crate::app::models::TripRecord;
use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use std::collections::HashSet;
use tracing::{debug, info};

use super::exclusion::ExclusionLog;
use super::stats::CleaningStats;

/// Behavioral identity key for a trip
///
/// Coordinates are keyed by exact bit pattern: the duplicate contract is
/// exact equality of source values, not numeric closeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TripKey {
    pickup_millis: i64,
    dropoff_millis: i64,
    pickup_longitude_bits: u64,
    pickup_latitude_bits: u64,
}

impl TripKey {
    /// Build the identity key for a record, if it has the key fields
    pub fn from_record(record: &TripRecord) -> Option<Self> {
        Some(Self {
            pickup_millis: millis(record.pickup_datetime?),
            dropoff_millis: millis(record.dropoff_datetime?),
            pickup_longitude_bits: record.pickup_longitude?.to_bits(),
            pickup_latitude_bits: record.pickup_latitude?.to_bits(),
        })
    }
}

fn millis(dt: DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}

/// Remove behavioral duplicates, keeping the first occurrence in input order
///
/// # Arguments
///
/// * `records` - Input records in input order
/// * `exclusions` - Shared exclusion log
/// * `stats` - Mutable statistics accumulator
/// * `progress_bar` - Optional progress bar for tracking progress
///
/// # Returns
///
/// Surviving records, still in input order
pub fn deduplicate_trips(
    records: Vec<TripRecord>,
    exclusions: &mut ExclusionLog,
    stats: &mut CleaningStats,
    progress_bar: Option<&ProgressBar>,
) -> Vec<TripRecord> {
    let initial_count = records.len();
    let mut seen: HashSet<TripKey> = HashSet::with_capacity(initial_count);
    let mut survivors = Vec::with_capacity(initial_count);

    for record in records {
        if let Some(pb) = progress_bar {
            pb.inc(1);
        }

        match TripKey::from_record(&record) {
            Some(key) => {
                if seen.insert(key) {
                    survivors.push(record);
                } else {
                    debug!(
                        "Excluding duplicate trip {:?} at {:?}",
                        record.id, record.pickup_datetime
                    );
                    exclusions.record(&record);
                }
            }
            // Key fields are guaranteed by the missing-value stage; a record
            // without them cannot collide and passes through untouched.
            None => survivors.push(record),
        }
    }

    stats.duplicates_removed = initial_count - survivors.len();

    info!(
        "Deduplication complete: {} -> {} records ({} duplicates removed)",
        initial_count,
        survivors.len(),
        stats.duplicates_removed
    );

    survivors
}

/// Check if two records are duplicates under the identity key
pub fn are_duplicates(a: &TripRecord, b: &TripRecord) -> bool {
    match (TripKey::from_record(a), TripKey::from_record(b)) {
        (Some(key_a), Some(key_b)) => key_a == key_b,
        _ => false,
    }
}
