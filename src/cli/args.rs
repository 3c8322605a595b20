//! Command-line argument definitions for the trip processor
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the taxi trip processor
///
/// Cleans raw NYC taxi trip CSV files into an analysis-ready dataset with
/// derived features, a full exclusion log, and a cleaning report.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "trip-processor",
    version,
    about = "Clean and enrich raw taxi trip CSV data",
    long_about = "A production-ready tool that cleans raw NYC taxi trip records: removes \
                  records with missing critical fields, deduplicates behaviorally identical \
                  trips, filters implausible records, derives analytical features, and writes \
                  the cleaned dataset together with a full audit trail of every exclusion."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the trip processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run the full cleaning pipeline over a raw trip file (main command)
    Clean(CleanArgs),
    /// Inspect a raw trip file's schema without processing it
    Inspect(InspectArgs),
}

/// Arguments for the clean command (main data processing)
#[derive(Debug, Clone, Parser)]
pub struct CleanArgs {
    /// Path to the raw trip CSV file
    #[arg(value_name = "INPUT", help = "Path to the raw trip CSV file")]
    pub input_path: PathBuf,

    /// Output directory for generated artifacts
    ///
    /// Will be created if it doesn't exist. Receives the cleaned dataset,
    /// the exclusion log, and the cleaning report.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        default_value = "output",
        help = "Output directory for generated artifacts"
    )]
    pub output_path: PathBuf,

    /// Path to configuration file
    ///
    /// TOML configuration file for validation bounds and output settings.
    /// If not specified, looks for ~/.config/trip-processor/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Maximum record snapshots kept in the exclusion log
    #[arg(
        long = "exclusion-limit",
        value_name = "COUNT",
        help = "Maximum record snapshots kept in the exclusion log"
    )]
    pub exclusion_limit: Option<usize>,

    /// Disable progress bars
    #[arg(long = "no-progress", help = "Disable progress bars")]
    pub no_progress: bool,

    /// Summary output format
    #[arg(
        long = "format",
        value_name = "FORMAT",
        default_value = "human",
        help = "Summary output format"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and critical messages. Overrides verbose settings.
    #[arg(short = 'q', long = "quiet", help = "Suppress non-error output")]
    pub quiet: bool,
}

/// Arguments for the inspect command (schema discovery)
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// Path to the raw trip CSV file
    #[arg(value_name = "INPUT", help = "Path to the raw trip CSV file")]
    pub input_path: PathBuf,

    /// Number of data rows to sample
    #[arg(
        short = 'n',
        long = "sample",
        value_name = "ROWS",
        default_value = "5",
        help = "Number of data rows to sample"
    )]
    pub sample_rows: usize,

    /// Report output format
    #[arg(
        long = "format",
        value_name = "FORMAT",
        default_value = "human",
        help = "Report output format"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(short = 'q', long = "quiet", help = "Suppress non-error output")]
    pub quiet: bool,
}

/// Output format for run summaries and inspection reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output
    Human,
    /// Machine-readable JSON
    Json,
}

/// Resolve a log level from verbosity flags (quiet wins)
pub fn log_level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

impl Commands {
    /// Verbosity count for logging setup
    pub fn verbose(&self) -> u8 {
        match self {
            Commands::Clean(args) => args.verbose,
            Commands::Inspect(args) => args.verbose,
        }
    }

    /// Quiet flag for logging setup
    pub fn quiet(&self) -> bool {
        match self {
            Commands::Clean(args) => args.quiet,
            Commands::Inspect(args) => args.quiet,
        }
    }

    /// Resolve the log level from verbosity flags
    pub fn log_level(&self) -> &'static str {
        log_level_for(self.verbose(), self.quiet())
    }
}

impl CleanArgs {
    /// Whether progress bars should be shown
    pub fn show_progress(&self) -> bool {
        !self.no_progress && !self.quiet
    }

    /// Validate argument consistency
    pub fn validate(&self) -> Result<()> {
        if self.input_path == self.output_path {
            return Err(Error::configuration(
                "Input file and output directory cannot be the same path".to_string(),
            ));
        }

        if let Some(limit) = self.exclusion_limit {
            if limit == 0 {
                return Err(Error::configuration(
                    "Exclusion log limit must be at least 1".to_string(),
                ));
            }
        }

        Ok(())
    }
}
