//! Tests for the exclusion log and cleaning report writers

use super::cleaned_result;
use crate::app::services::report_writer::report::{
    CleaningReport, ReportWriter, write_cleaning_report, write_exclusion_log,
};
use crate::config::OutputConfig;
use tempfile::TempDir;

#[test]
fn test_exclusion_log_shape() {
    let (result, _) = cleaned_result();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("excluded.json");

    write_exclusion_log(&result.exclusions, &path).unwrap();

    let payload: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(payload["count"], 3);
    let records = payload["records"].as_array().unwrap();
    assert_eq!(records.len(), 3);

    // Snapshots carry the record state at removal time
    let ids: Vec<&str> = records
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"missing"));
    assert!(ids.contains(&"dup_drop"));
    assert!(ids.contains(&"outlier"));
}

#[test]
fn test_cleaning_report_shape() {
    let (result, schema) = cleaned_result();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.json");

    write_cleaning_report(&result.stats, &schema, &path).unwrap();

    let payload: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(payload["statistics"]["original_count"], 6);
    assert_eq!(payload["statistics"]["missing_values_removed"], 1);
    assert_eq!(payload["statistics"]["duplicates_removed"], 1);
    assert_eq!(payload["statistics"]["outliers_removed"], 1);
    assert_eq!(payload["statistics"]["final_count"], 3);
    assert_eq!(payload["retention_rate"], "50.00%");

    let columns = payload["columns"].as_array().unwrap();
    assert!(!columns.is_empty());

    let data_types = payload["data_types"].as_object().unwrap();
    assert_eq!(data_types.len(), columns.len());
    assert_eq!(data_types["pickup_datetime"], "datetime");
    assert_eq!(data_types["passenger_count"], "integer");
    assert_eq!(data_types["trip_speed_kmh"], "float");
    assert_eq!(data_types["time_period"], "category");
    assert_eq!(data_types["is_weekend"], "boolean");

    assert!(payload["timestamp"].is_string());
}

#[test]
fn test_report_columns_match_schema() {
    let (result, schema) = cleaned_result();
    let report = CleaningReport::build(&result.stats, &schema);

    assert!(report.columns.contains(&"fare_per_km".to_string()));
    assert!(report.columns.contains(&"tip_percentage".to_string()));

    // Every listed column has a type entry
    for column in &report.columns {
        assert!(report.data_types.contains_key(column));
    }
}

#[test]
fn test_report_writer_writes_all_artifacts() {
    let (result, schema) = cleaned_result();
    let dir = TempDir::new().unwrap();

    let writer = ReportWriter::new(dir.path().to_path_buf(), OutputConfig::default());
    let paths = writer.write_all(&result, &schema).unwrap();

    assert!(paths.cleaned_data.exists());
    assert!(paths.exclusion_log.exists());
    assert!(paths.cleaning_report.exists());

    assert_eq!(
        paths.cleaned_data.file_name().unwrap(),
        "cleaned_trips.csv"
    );
    assert_eq!(
        paths.exclusion_log.file_name().unwrap(),
        "excluded_records.json"
    );
    assert_eq!(
        paths.cleaning_report.file_name().unwrap(),
        "cleaning_report.json"
    );
}
