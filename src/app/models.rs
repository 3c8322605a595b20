//! Data models for trip processing
//!
//! This module contains the core data structures for representing taxi trip
//! records as they move through the cleaning pipeline, along with the source
//! schema descriptor that records which optional columns the input carries.

use crate::constants::{RUSH_HOURS, WEEKEND_DAYS, distance_category, time_period};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

// =============================================================================
// Source Schema Descriptor
// =============================================================================

/// Capability descriptor for the source file, resolved once at load time
///
/// Optional-column-driven behaviour (imputation, validity conditions, derived
/// features) keys off this descriptor rather than re-probing each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SourceSchema {
    /// Source carries a trip identifier column
    pub has_id: bool,

    /// Source carries a vendor identifier column
    pub has_vendor_id: bool,

    /// Source carries a passenger count column
    pub has_passenger_count: bool,

    /// Source carries a trip distance column (miles)
    pub has_trip_distance: bool,

    /// Source carries a fare amount column
    pub has_fare_amount: bool,

    /// Source carries a tip amount column
    pub has_tip_amount: bool,

    /// Source carries a store-and-forward flag column
    pub has_store_and_fwd_flag: bool,
}

impl SourceSchema {
    /// Distance-based features (distance_km, speed, distance_category) apply
    pub fn derives_distance_features(&self) -> bool {
        self.has_trip_distance
    }

    /// Fare-per-km applies (needs both fare and distance)
    pub fn derives_fare_per_km(&self) -> bool {
        self.has_fare_amount && self.has_trip_distance
    }

    /// Tip percentage applies (needs both tip and fare)
    pub fn derives_tip_percentage(&self) -> bool {
        self.has_tip_amount && self.has_fare_amount
    }
}

// =============================================================================
// Categorical Features
// =============================================================================

/// Time-of-day bucket derived from the pickup hour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePeriod {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimePeriod {
    /// Bucket an hour of day (0-23)
    pub fn from_hour(hour: u32) -> Self {
        if (time_period::MORNING_START..time_period::AFTERNOON_START).contains(&hour) {
            TimePeriod::Morning
        } else if (time_period::AFTERNOON_START..time_period::EVENING_START).contains(&hour) {
            TimePeriod::Afternoon
        } else if (time_period::EVENING_START..time_period::EVENING_END).contains(&hour) {
            TimePeriod::Evening
        } else {
            TimePeriod::Night
        }
    }

    /// Canonical label used in output files
    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::Morning => "morning",
            TimePeriod::Afternoon => "afternoon",
            TimePeriod::Evening => "evening",
            TimePeriod::Night => "night",
        }
    }
}

impl std::fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TimePeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Trip length bucket derived from the distance in miles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceCategory {
    VeryShort,
    Short,
    Medium,
    Long,
}

impl DistanceCategory {
    /// Bucket a distance in miles (thresholds strictly increasing, first match wins)
    pub fn from_miles(distance: f64) -> Self {
        if distance < distance_category::VERY_SHORT_BELOW {
            DistanceCategory::VeryShort
        } else if distance < distance_category::SHORT_BELOW {
            DistanceCategory::Short
        } else if distance < distance_category::MEDIUM_BELOW {
            DistanceCategory::Medium
        } else {
            DistanceCategory::Long
        }
    }

    /// Canonical label used in output files
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceCategory::VeryShort => "very_short",
            DistanceCategory::Short => "short",
            DistanceCategory::Medium => "medium",
            DistanceCategory::Long => "long",
        }
    }
}

impl std::fmt::Display for DistanceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DistanceCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// =============================================================================
// Trip Record Structure
// =============================================================================

/// One taxi trip observation, raw or in progress
///
/// Every load-time field is optional: the loader performs no validation, so a
/// malformed row produces `None` fields and is rejected by the appropriate
/// later stage rather than at parse time. Derived fields start as `None` and
/// are filled in (or deliberately nulled) by the feature deriver.
#[derive(Debug, Clone, Serialize)]
pub struct TripRecord {
    /// Trip identifier from the source, when present
    pub id: Option<String>,

    /// Vendor identifier from the source, when present
    pub vendor_id: Option<String>,

    /// Pickup timestamp
    #[serde(serialize_with = "serialize_opt_datetime")]
    pub pickup_datetime: Option<DateTime<Utc>>,

    /// Dropoff timestamp
    #[serde(serialize_with = "serialize_opt_datetime")]
    pub dropoff_datetime: Option<DateTime<Utc>>,

    /// Pickup longitude in decimal degrees
    pub pickup_longitude: Option<f64>,

    /// Pickup latitude in decimal degrees
    pub pickup_latitude: Option<f64>,

    /// Dropoff longitude in decimal degrees
    pub dropoff_longitude: Option<f64>,

    /// Dropoff latitude in decimal degrees
    pub dropoff_latitude: Option<f64>,

    /// Passenger count (kept as float until normalization casts it)
    pub passenger_count: Option<f64>,

    /// Trip distance in statute miles
    pub trip_distance: Option<f64>,

    /// Fare amount in dollars
    pub fare_amount: Option<f64>,

    /// Tip amount in dollars
    pub tip_amount: Option<f64>,

    /// Store-and-forward flag ("Y"/"N")
    pub store_and_fwd_flag: Option<String>,

    // Derived fields, populated by the validity filter and feature deriver
    /// Trip duration in seconds (fractional)
    pub trip_duration_seconds: Option<f64>,

    /// Trip distance converted to kilometres
    pub trip_distance_km: Option<f64>,

    /// Average speed in km/h, nulled when physically implausible
    pub trip_speed_kmh: Option<f64>,

    /// Fare per kilometre, nulled when the distance is zero
    pub fare_per_km: Option<f64>,

    /// Tip as a percentage of the fare, forced to zero on zero fares
    pub tip_percentage: Option<f64>,

    /// Hour component of the pickup timestamp (0-23)
    pub hour_of_day: Option<u32>,

    /// Day of week of the pickup timestamp (Monday = 0)
    pub day_of_week: Option<u32>,

    /// Time-of-day bucket
    pub time_period: Option<TimePeriod>,

    /// Trip length bucket
    pub distance_category: Option<DistanceCategory>,

    /// Pickup falls within a rush-hour window
    pub is_rush_hour: Option<bool>,

    /// Pickup falls on a weekend day
    pub is_weekend: Option<bool>,
}

impl TripRecord {
    /// Create an empty record; the loader fills in whatever the row carries
    pub fn empty() -> Self {
        Self {
            id: None,
            vendor_id: None,
            pickup_datetime: None,
            dropoff_datetime: None,
            pickup_longitude: None,
            pickup_latitude: None,
            dropoff_longitude: None,
            dropoff_latitude: None,
            passenger_count: None,
            trip_distance: None,
            fare_amount: None,
            tip_amount: None,
            store_and_fwd_flag: None,
            trip_duration_seconds: None,
            trip_distance_km: None,
            trip_speed_kmh: None,
            fare_per_km: None,
            tip_percentage: None,
            hour_of_day: None,
            day_of_week: None,
            time_period: None,
            distance_category: None,
            is_rush_hour: None,
            is_weekend: None,
        }
    }

    /// Check that all six critical fields are present
    ///
    /// Timestamps and both coordinate pairs are required for a record to be
    /// usable at all; anything else is imputable or optional.
    pub fn has_required_fields(&self) -> bool {
        self.pickup_datetime.is_some()
            && self.dropoff_datetime.is_some()
            && self.pickup_longitude.is_some()
            && self.pickup_latitude.is_some()
            && self.dropoff_longitude.is_some()
            && self.dropoff_latitude.is_some()
    }

    /// Pickup hour falls within a rush-hour window
    pub fn hour_is_rush_hour(hour: u32) -> bool {
        RUSH_HOURS.contains(&hour)
    }

    /// Day index (Monday = 0) falls on a weekend
    pub fn day_is_weekend(day: u32) -> bool {
        WEEKEND_DAYS.contains(&day)
    }
}

/// Serialize optional timestamps in the raw file format rather than RFC 3339,
/// so exclusion-log snapshots read like the source rows they came from.
fn serialize_opt_datetime<S: Serializer>(
    value: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(dt) => serializer.serialize_str(&dt.format(crate::constants::TIMESTAMP_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_time_period_buckets() {
        assert_eq!(TimePeriod::from_hour(6), TimePeriod::Morning);
        assert_eq!(TimePeriod::from_hour(11), TimePeriod::Morning);
        assert_eq!(TimePeriod::from_hour(12), TimePeriod::Afternoon);
        assert_eq!(TimePeriod::from_hour(17), TimePeriod::Afternoon);
        assert_eq!(TimePeriod::from_hour(18), TimePeriod::Evening);
        assert_eq!(TimePeriod::from_hour(21), TimePeriod::Evening);
        assert_eq!(TimePeriod::from_hour(22), TimePeriod::Night);
        assert_eq!(TimePeriod::from_hour(0), TimePeriod::Night);
        assert_eq!(TimePeriod::from_hour(5), TimePeriod::Night);
    }

    #[test]
    fn test_distance_category_boundaries() {
        // Thresholds are strict upper bounds: the boundary value falls into
        // the next category up.
        assert_eq!(DistanceCategory::from_miles(0.5), DistanceCategory::VeryShort);
        assert_eq!(DistanceCategory::from_miles(1.0), DistanceCategory::Short);
        assert_eq!(DistanceCategory::from_miles(2.9), DistanceCategory::Short);
        assert_eq!(DistanceCategory::from_miles(3.0), DistanceCategory::Medium);
        assert_eq!(DistanceCategory::from_miles(9.99), DistanceCategory::Medium);
        assert_eq!(DistanceCategory::from_miles(10.0), DistanceCategory::Long);
        assert_eq!(DistanceCategory::from_miles(42.0), DistanceCategory::Long);
    }

    #[test]
    fn test_has_required_fields() {
        let mut record = TripRecord::empty();
        assert!(!record.has_required_fields());

        record.pickup_datetime = Some(Utc.with_ymd_and_hms(2016, 3, 14, 17, 24, 55).unwrap());
        record.dropoff_datetime = Some(Utc.with_ymd_and_hms(2016, 3, 14, 17, 32, 30).unwrap());
        record.pickup_longitude = Some(-73.98);
        record.pickup_latitude = Some(40.76);
        record.dropoff_longitude = Some(-73.96);
        assert!(!record.has_required_fields());

        record.dropoff_latitude = Some(40.77);
        assert!(record.has_required_fields());
    }

    #[test]
    fn test_rush_hour_and_weekend_membership() {
        assert!(TripRecord::hour_is_rush_hour(7));
        assert!(TripRecord::hour_is_rush_hour(8));
        assert!(TripRecord::hour_is_rush_hour(17));
        assert!(TripRecord::hour_is_rush_hour(18));
        assert!(!TripRecord::hour_is_rush_hour(9));
        assert!(!TripRecord::hour_is_rush_hour(16));

        assert!(TripRecord::day_is_weekend(5));
        assert!(TripRecord::day_is_weekend(6));
        assert!(!TripRecord::day_is_weekend(0));
        assert!(!TripRecord::day_is_weekend(4));
    }

    #[test]
    fn test_snapshot_serializes_timestamps_in_source_format() {
        let mut record = TripRecord::empty();
        record.pickup_datetime = Some(Utc.with_ymd_and_hms(2016, 3, 14, 17, 24, 55).unwrap());

        let snapshot = serde_json::to_value(&record).unwrap();
        assert_eq!(snapshot["pickup_datetime"], "2016-03-14 17:24:55");
        assert!(snapshot["dropoff_datetime"].is_null());
    }
}
