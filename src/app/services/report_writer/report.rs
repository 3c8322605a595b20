//! Exclusion log and cleaning report JSON writers

use crate::app::models::SourceSchema;
use crate::app::services::trip_pipeline::{CleaningStats, ExclusionLog, PipelineResult};
use crate::config::OutputConfig;
use crate::{Error, Result};
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

use super::columns::output_columns;
use super::writer::write_cleaned_csv;

/// Cleaning report payload
///
/// Shape matches the downstream consumers: counters under `statistics`, the
/// retention rate pre-formatted as a percentage string, and the output
/// schema as a column list plus a per-column type map.
#[derive(Debug, Clone, Serialize)]
pub struct CleaningReport {
    /// Run completion time (RFC 3339)
    pub timestamp: String,

    /// Per-stage counters
    pub statistics: CleaningStats,

    /// Retention rate, formatted "NN.NN%"
    pub retention_rate: String,

    /// Output columns in canonical order
    pub columns: Vec<String>,

    /// Inferred storage type per output column
    pub data_types: BTreeMap<String, String>,
}

impl CleaningReport {
    /// Build the report for a completed run
    pub fn build(stats: &CleaningStats, schema: &SourceSchema) -> Self {
        let columns = output_columns(schema);

        Self {
            timestamp: Utc::now().to_rfc3339(),
            statistics: stats.clone(),
            retention_rate: stats.retention_rate_formatted(),
            columns: columns.iter().map(|c| c.name.to_string()).collect(),
            data_types: columns
                .iter()
                .map(|c| (c.name.to_string(), c.dtype.as_str().to_string()))
                .collect(),
        }
    }
}

/// Paths of the artifacts written by a run
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub cleaned_data: PathBuf,
    pub exclusion_log: PathBuf,
    pub cleaning_report: PathBuf,
}

/// Writer for the three run artifacts
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
    output: OutputConfig,
}

impl ReportWriter {
    /// Create a writer targeting an output directory
    pub fn new(output_dir: PathBuf, output: OutputConfig) -> Self {
        Self { output_dir, output }
    }

    /// Write the cleaned dataset, exclusion log, and cleaning report
    pub fn write_all(&self, result: &PipelineResult, schema: &SourceSchema) -> Result<OutputPaths> {
        let paths = self.output_paths();

        write_cleaned_csv(&result.records, schema, &paths.cleaned_data)?;
        write_exclusion_log(&result.exclusions, &paths.exclusion_log)?;
        write_cleaning_report(&result.stats, schema, &paths.cleaning_report)?;

        Ok(paths)
    }

    /// Artifact paths for this writer's output directory
    pub fn output_paths(&self) -> OutputPaths {
        OutputPaths {
            cleaned_data: self.output_dir.join(&self.output.cleaned_data_filename),
            exclusion_log: self.output_dir.join(&self.output.exclusion_log_filename),
            cleaning_report: self.output_dir.join(&self.output.cleaning_report_filename),
        }
    }
}

/// Write the exclusion log as `{count, records}` JSON
pub fn write_exclusion_log(log: &ExclusionLog, path: &Path) -> Result<()> {
    write_json(log, path)?;

    info!(
        "Wrote exclusion log to {} ({} excluded, {} snapshots)",
        path.display(),
        log.count(),
        log.snapshots().len()
    );
    Ok(())
}

/// Write the cleaning report JSON
pub fn write_cleaning_report(
    stats: &CleaningStats,
    schema: &SourceSchema,
    path: &Path,
) -> Result<()> {
    let report = CleaningReport::build(stats, schema);
    write_json(&report, path)?;

    info!("Wrote cleaning report to {}", path.display());
    Ok(())
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)?;
    std::fs::write(path, payload).map_err(|e| {
        Error::report_writing(format!("Failed to write '{}': {}", path.display(), e))
    })
}
