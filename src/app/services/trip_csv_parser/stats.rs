//! Parsing statistics and result structures

use crate::app::models::{SourceSchema, TripRecord};

/// Statistics for a single file parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Total data rows read from the file
    pub total_rows: usize,

    /// Number of columns detected in the header
    pub columns_detected: usize,
}

/// Result of parsing a raw trip file
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Loaded records, in input order
    pub records: Vec<TripRecord>,

    /// Capability descriptor resolved from the header
    pub schema: SourceSchema,

    /// Parsing statistics
    pub stats: ParseStats,
}

impl ParseResult {
    /// Number of records loaded (the pipeline's `original_count`)
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}
