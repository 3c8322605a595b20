//! Main pipeline driver and stage sequencing
//!
//! The driver owns the working record set for the duration of the run and
//! threads the exclusion log and statistics accumulator through the stages
//! in their fixed order. Stages never see each other; composition lives here.

use crate::Config;
use crate::app::models::{SourceSchema, TripRecord};
use crate::config::ValidationConfig;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::{
    deduplication::deduplicate_trips,
    exclusion::ExclusionLog,
    features::derive_features,
    missing_values::handle_missing_values,
    normalize::normalize_records,
    stats::{CleaningStats, PipelineResult},
    validity::apply_validity_filters,
};

/// Cleaning pipeline for taxi trip records
///
/// Runs the fixed stage sequence over a loaded record set:
/// missing-value handling, deduplication, validity filtering, feature
/// derivation, and normalization. Single-threaded, single-pass; each stage
/// runs to completion before the next begins.
#[derive(Debug, Clone)]
pub struct TripPipeline {
    /// Plausibility bounds for the validity filter and speed cap
    validation: ValidationConfig,

    /// Snapshot cap for the exclusion log
    exclusion_log_limit: usize,

    /// Show per-stage progress bars
    show_progress: bool,
}

impl TripPipeline {
    /// Create a pipeline from the run configuration
    pub fn new(config: &Config) -> Self {
        Self {
            validation: config.validation.clone(),
            exclusion_log_limit: config.output.exclusion_log_limit,
            show_progress: config.processing.show_progress,
        }
    }

    /// Run the full cleaning pipeline over a loaded record set
    ///
    /// # Arguments
    ///
    /// * `records` - Loaded records in input order
    /// * `schema` - Source schema descriptor resolved by the loader
    ///
    /// # Returns
    ///
    /// A `PipelineResult` with the cleaned records, the exclusion log, and
    /// the per-stage statistics
    pub fn run(&self, records: Vec<TripRecord>, schema: SourceSchema) -> PipelineResult {
        let mut stats = CleaningStats::new();
        let mut exclusions = ExclusionLog::with_limit(self.exclusion_log_limit);

        stats.original_count = records.len();
        info!(
            "Starting cleaning pipeline for {} records",
            stats.original_count
        );

        // Stage 2: drop records missing critical fields, impute passengers
        let pb = self.stage_progress_bar(records.len(), "Missing values");
        let records = handle_missing_values(records, &schema, &mut exclusions, &mut stats, pb.as_ref());
        finish_stage(pb, records.len());

        // Stage 3: first-seen-wins deduplication
        let pb = self.stage_progress_bar(records.len(), "Deduplication");
        let records = deduplicate_trips(records, &mut exclusions, &mut stats, pb.as_ref());
        finish_stage(pb, records.len());

        // Stage 4: plausibility envelope
        let pb = self.stage_progress_bar(records.len(), "Validity filtering");
        let mut records = apply_validity_filters(
            records,
            &schema,
            &self.validation,
            &mut exclusions,
            &mut stats,
            pb.as_ref(),
        );
        finish_stage(pb, records.len());

        // Stage 5: derived features (no exclusions)
        let pb = self.stage_progress_bar(records.len(), "Feature derivation");
        derive_features(&mut records, &schema, &self.validation, pb.as_ref());
        finish_stage(pb, records.len());

        // Stage 6: rounding, casting, canonical order
        normalize_records(&mut records, &mut stats);

        info!("{}", stats.summary());

        debug_assert!(stats.is_fully_accounted());
        PipelineResult::new(records, exclusions, stats)
    }

    /// Validation bounds in effect for this pipeline
    pub fn validation(&self) -> &ValidationConfig {
        &self.validation
    }

    fn stage_progress_bar(&self, total: usize, operation: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message(operation.to_string());
        Some(pb)
    }
}

fn finish_stage(progress_bar: Option<ProgressBar>, survivors: usize) {
    if let Some(pb) = progress_bar {
        pb.finish_with_message(format!("{} records remaining", survivors));
    }
}
