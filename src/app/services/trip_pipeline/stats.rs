//! Cleaning statistics and result structures for the trip pipeline
//!
//! Counters accumulate monotonically: each stage contributes its own delta at
//! the time it runs, and nothing is revised retroactively.

use crate::app::models::TripRecord;
use serde::Serialize;

use super::exclusion::ExclusionLog;

/// Per-stage removal counters for one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleaningStats {
    /// Number of records loaded from the source
    pub original_count: usize,

    /// Records removed for missing critical fields
    pub missing_values_removed: usize,

    /// Records removed as duplicates
    pub duplicates_removed: usize,

    /// Records removed as outliers or invalid
    pub outliers_removed: usize,

    /// Records remaining after the full pipeline
    pub final_count: usize,
}

impl CleaningStats {
    /// Create new empty cleaning statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Total records removed across all stages
    pub fn total_removed(&self) -> usize {
        self.missing_values_removed + self.duplicates_removed + self.outliers_removed
    }

    /// Retention rate as a percentage of the original count
    pub fn retention_rate(&self) -> f64 {
        if self.original_count == 0 {
            100.0
        } else {
            (self.final_count as f64 / self.original_count as f64) * 100.0
        }
    }

    /// Retention rate formatted for the cleaning report ("NN.NN%")
    pub fn retention_rate_formatted(&self) -> String {
        format!("{:.2}%", self.retention_rate())
    }

    /// Every input record is either retained or attributed to a removal stage
    pub fn is_fully_accounted(&self) -> bool {
        self.original_count == self.final_count + self.total_removed()
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Cleaning summary: {} -> {} records ({}) | \
             missing: {} | duplicates: {} | outliers: {}",
            self.original_count,
            self.final_count,
            self.retention_rate_formatted(),
            self.missing_values_removed,
            self.duplicates_removed,
            self.outliers_removed
        )
    }
}

/// Result of a full pipeline run
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Cleaned, enriched, canonically ordered records
    pub records: Vec<TripRecord>,

    /// Everything removed, with capped snapshots
    pub exclusions: ExclusionLog,

    /// Per-stage counters
    pub stats: CleaningStats,
}

impl PipelineResult {
    /// Create a new pipeline result
    pub fn new(records: Vec<TripRecord>, exclusions: ExclusionLog, stats: CleaningStats) -> Self {
        Self {
            records,
            exclusions,
            stats,
        }
    }

    /// Number of retained records
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}
