//! Exclusion log for removed records
//!
//! Every record a stage removes is snapshotted here verbatim, in removal
//! order, so the run can account for the fate of every input row. Only the
//! first `limit` snapshots are retained to bound output size; the count keeps
//! incrementing past the cap and is reported separately.

use crate::app::models::TripRecord;
use crate::constants::EXCLUSION_LOG_LIMIT;
use serde::Serialize;
use tracing::debug;

/// Audit log of excluded records
#[derive(Debug, Clone, Serialize)]
pub struct ExclusionLog {
    /// Total number of records excluded (not capped)
    #[serde(rename = "count")]
    total: usize,

    /// Snapshots of the first `limit` excluded records
    #[serde(rename = "records")]
    snapshots: Vec<serde_json::Value>,

    /// Snapshot retention cap
    #[serde(skip)]
    limit: usize,
}

impl ExclusionLog {
    /// Create an empty log with the default snapshot cap
    pub fn new() -> Self {
        Self::with_limit(EXCLUSION_LOG_LIMIT)
    }

    /// Create an empty log with an explicit snapshot cap
    pub fn with_limit(limit: usize) -> Self {
        Self {
            total: 0,
            snapshots: Vec::new(),
            limit,
        }
    }

    /// Record an exclusion, snapshotting the record's state at removal time
    pub fn record(&mut self, record: &TripRecord) {
        self.total += 1;

        if self.snapshots.len() < self.limit {
            match serde_json::to_value(record) {
                Ok(snapshot) => self.snapshots.push(snapshot),
                Err(e) => debug!("Failed to snapshot excluded record: {}", e),
            }
        }
    }

    /// Total number of exclusions, including those past the snapshot cap
    pub fn count(&self) -> usize {
        self.total
    }

    /// Retained snapshots, in removal order
    pub fn snapshots(&self) -> &[serde_json::Value] {
        &self.snapshots
    }

    /// Whether any snapshots were dropped by the cap
    pub fn is_truncated(&self) -> bool {
        self.total > self.snapshots.len()
    }
}

impl Default for ExclusionLog {
    fn default() -> Self {
        Self::new()
    }
}
