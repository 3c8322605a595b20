//! Tests for the output writers

pub mod report_tests;

use crate::Config;
use crate::app::models::SourceSchema;
use crate::app::services::trip_pipeline::{PipelineResult, TripPipeline};
use crate::app::services::trip_pipeline::tests::{
    create_distinct_record, create_valid_record, full_schema,
};
use std::path::PathBuf;

/// Run the pipeline over a small batch with one of each exclusion kind
pub fn cleaned_result() -> (PipelineResult, SourceSchema) {
    let schema = full_schema();

    let mut missing = create_distinct_record("missing", 20);
    missing.pickup_latitude = None;

    let mut outlier = create_distinct_record("outlier", 30);
    outlier.fare_amount = Some(900.0);

    let records = vec![
        create_distinct_record("a", 0),
        create_distinct_record("b", 1),
        create_valid_record("dup_keep"),
        create_valid_record("dup_drop"),
        missing,
        outlier,
    ];

    let config = Config::new(PathBuf::from("unused.csv"), PathBuf::from("out"));
    let result = TripPipeline::new(&config).run(records, schema);
    (result, schema)
}
