//! Cleaning pipeline for taxi trip records
//!
//! This module implements the sequential cleaning pipeline applied after CSV
//! loading. Each stage consumes the prior stage's survivors and produces a
//! smaller, annotated working set, appending everything it removes to a shared
//! exclusion log so that every input record is accounted for.
//!
//! # Architecture
//!
//! - [`pipeline`] - Main TripPipeline driver and stage sequencing
//! - [`missing_values`] - Removal of records lacking critical fields
//! - [`deduplication`] - First-seen-wins duplicate removal
//! - [`validity`] - Geographic, temporal, and numeric plausibility filtering
//! - [`features`] - Derived feature computation
//! - [`normalize`] - Final rounding, casting, and canonical ordering
//! - [`exclusion`] - The capped exclusion log
//! - [`stats`] - Cleaning statistics and result structures
//!
//! # Processing Pipeline
//!
//! 1. **Missing values**: drop records lacking timestamps or coordinates,
//!    impute passenger counts on survivors
//! 2. **Deduplication**: drop later occurrences of behaviorally identical trips
//! 3. **Validity**: drop trips outside the plausibility envelope
//! 4. **Features**: add derived analytical fields (never drops records)
//! 5. **Normalization**: round, cast, and sort into canonical order
//!
//! Stages communicate only through their input/output collections and the
//! explicit statistics accumulator; there is no shared mutable state.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use trip_processor::Config;
//! use trip_processor::app::services::trip_csv_parser::TripCsvParser;
//! use trip_processor::app::services::trip_pipeline::TripPipeline;
//!
//! # fn example() -> trip_processor::Result<()> {
//! let config = Config::new("train.csv".into(), "output".into());
//! let parsed = TripCsvParser::new().parse_file(&config.processing.input_path)?;
//!
//! let pipeline = TripPipeline::new(&config);
//! let result = pipeline.run(parsed.records, parsed.schema);
//!
//! println!("{}", result.stats.summary());
//! # Ok(())
//! # }
//! ```

pub mod deduplication;
pub mod exclusion;
pub mod features;
pub mod missing_values;
pub mod normalize;
pub mod pipeline;
pub mod stats;
pub mod validity;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use exclusion::ExclusionLog;
pub use pipeline::TripPipeline;
pub use stats::{CleaningStats, PipelineResult};
