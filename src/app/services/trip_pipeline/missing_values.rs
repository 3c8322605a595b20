//! Missing-value handling for trip records
//!
//! A record is unusable without its timestamps and both coordinate pairs;
//! such records are excluded here. A missing passenger count, by contrast,
//! is imputable and survivors receive the default value.

use crate::app::models::{SourceSchema, TripRecord};
use crate::constants::DEFAULT_PASSENGER_COUNT;
use indicatif::ProgressBar;
use tracing::info;

use super::exclusion::ExclusionLog;
use super::stats::CleaningStats;

/// Remove records lacking critical fields and impute passenger counts
///
/// # Arguments
///
/// * `records` - Input records in input order
/// * `schema` - Source schema capability descriptor
/// * `exclusions` - Shared exclusion log
/// * `stats` - Mutable statistics accumulator
/// * `progress_bar` - Optional progress bar for tracking progress
///
/// # Returns
///
/// Surviving records, still in input order
pub fn handle_missing_values(
    records: Vec<TripRecord>,
    schema: &SourceSchema,
    exclusions: &mut ExclusionLog,
    stats: &mut CleaningStats,
    progress_bar: Option<&ProgressBar>,
) -> Vec<TripRecord> {
    let initial_count = records.len();
    let mut survivors = Vec::with_capacity(initial_count);

    for mut record in records {
        if let Some(pb) = progress_bar {
            pb.inc(1);
        }

        if !record.has_required_fields() {
            exclusions.record(&record);
            continue;
        }

        // Imputation only applies when the source carries the column at all
        if schema.has_passenger_count && record.passenger_count.is_none() {
            record.passenger_count = Some(DEFAULT_PASSENGER_COUNT);
        }

        survivors.push(record);
    }

    stats.missing_values_removed = initial_count - survivors.len();

    info!(
        "Missing value handling complete: {} -> {} records ({} removed)",
        initial_count,
        survivors.len(),
        stats.missing_values_removed
    );

    survivors
}
