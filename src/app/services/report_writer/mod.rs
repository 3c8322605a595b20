//! Output writers for the cleaning run artifacts
//!
//! This module persists the three run artifacts: the cleaned dataset (CSV,
//! in canonical order), the exclusion log (JSON, snapshots capped), and the
//! cleaning report (JSON, with statistics and the output schema).
//!
//! ## Architecture
//!
//! - [`columns`] - Canonical output column list and inferred types
//! - [`writer`] - Cleaned dataset CSV writer
//! - [`report`] - Exclusion log and cleaning report JSON writers

pub mod columns;
pub mod report;
pub mod writer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use columns::{ColumnSpec, ColumnType, output_columns};
pub use report::{CleaningReport, OutputPaths, ReportWriter};
