//! Tests for the raw trip CSV parser


use std::path::PathBuf;
use tempfile::TempDir;

/// Full header carrying every recognised column
pub const FULL_HEADER: &str = "id,vendor_id,pickup_datetime,dropoff_datetime,\
     passenger_count,trip_distance,fare_amount,tip_amount,\
     pickup_longitude,pickup_latitude,dropoff_longitude,dropoff_latitude,store_and_fwd_flag";

/// A well-formed data row matching [`FULL_HEADER`]
pub const VALID_ROW: &str = "id001,1,2016-03-14 17:24:55,2016-03-14 17:32:30,\
     1,1.5,8.5,1.0,-73.9821,40.7679,-73.9646,40.7655,N";

/// Write a CSV file into a temp dir and return its path
pub fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Write a full-schema file with the given data rows
pub fn write_full_schema_csv(dir: &TempDir, rows: &[&str]) -> PathBuf {
    let mut contents = String::from(FULL_HEADER);
    contents.push('\n');
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    write_csv(dir, "trips.csv", &contents)
}
