//! Command implementations for the trip processor CLI
//!
//! This module contains the main command execution logic, logging setup,
//! and summary reporting for the CLI interface.

use crate::app::services::report_writer::{OutputPaths, ReportWriter};
use crate::app::services::trip_csv_parser::column_mapping::ColumnMapping;
use crate::app::services::trip_csv_parser::TripCsvParser;
use crate::app::services::trip_pipeline::{CleaningStats, TripPipeline};
use crate::cli::args::{Args, CleanArgs, Commands, InspectArgs, OutputFormat};
use crate::config::Config;
use crate::constants::{OPTIONAL_COLUMNS, REQUIRED_COLUMNS};
use crate::{Error, Result};
use colored::Colorize;
use indicatif::HumanDuration;
use std::time::Instant;
use tracing::{debug, info};

/// Main command runner for the trip processor
///
/// Orchestrates the workflow: set up logging, dispatch the subcommand, and
/// surface a fatal error to the caller for process exit handling.
pub async fn run(args: Args) -> Result<()> {
    let Some(command) = args.command else {
        // main() shows help when no subcommand is given; reaching here
        // without one is a programming error upstream.
        return Err(Error::configuration("No command specified".to_string()));
    };

    setup_logging(&command)?;

    info!("Starting trip processor");
    debug!("Command line arguments: {:?}", command);

    match command {
        Commands::Clean(clean_args) => run_clean(clean_args).await,
        Commands::Inspect(inspect_args) => run_inspect(inspect_args).await,
    }
}

/// Set up structured logging based on CLI arguments
fn setup_logging(command: &Commands) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = command.log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("trip_processor={}", log_level)));

    if command.quiet() {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Run the full cleaning pipeline
async fn run_clean(args: CleanArgs) -> Result<()> {
    let start_time = Instant::now();

    args.validate()?;

    let config = load_configuration(&args)?;
    config.validate()?;
    config.ensure_output_directory()?;

    // Stage 1: load
    let parser = TripCsvParser::new();
    let parsed = parser.parse_file(&config.processing.input_path)?;

    // Stages 2-6: clean, derive, normalize
    let pipeline = TripPipeline::new(&config);
    let result = pipeline.run(parsed.records, parsed.schema);

    // Stage 7: persist artifacts
    let writer = ReportWriter::new(
        config.processing.output_path.clone(),
        config.output.clone(),
    );
    let paths = writer.write_all(&result, &parsed.schema)?;

    let elapsed = start_time.elapsed();
    match args.output_format {
        OutputFormat::Human => print_clean_summary(&result.stats, &paths, elapsed),
        OutputFormat::Json => print_clean_summary_json(&result.stats, &paths, elapsed)?,
    }

    Ok(())
}

/// Load configuration using the layered approach (defaults -> file -> args)
fn load_configuration(args: &CleanArgs) -> Result<Config> {
    info!("Loading configuration");

    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        info!("No config file found, using defaults");
    }

    let mut config = Config::load_layered(
        args.input_path.clone(),
        args.output_path.clone(),
        config_file,
    )?;

    // Apply CLI argument overrides
    config.processing.show_progress = args.show_progress();
    if let Some(limit) = args.exclusion_limit {
        config.output.exclusion_log_limit = limit;
    }
    config.logging.level = crate::cli::args::log_level_for(args.verbose, args.quiet).to_string();
    config.logging.structured = !args.quiet;

    Ok(config)
}

/// Print the human-readable run summary
fn print_clean_summary(stats: &CleaningStats, paths: &OutputPaths, elapsed: std::time::Duration) {
    println!();
    println!("{}", "Trip cleaning complete".bold().green());
    println!();
    println!("{}", "Cleaning summary:".bold());
    println!("  Original records:   {}", stats.original_count);
    println!("  Missing values:     {} removed", stats.missing_values_removed);
    println!("  Duplicates:         {} removed", stats.duplicates_removed);
    println!("  Outliers:           {} removed", stats.outliers_removed);
    println!("  Final records:      {}", stats.final_count);
    println!(
        "  Retention rate:     {}",
        stats.retention_rate_formatted().cyan()
    );
    println!("  Processing time:    {}", HumanDuration(elapsed));
    println!();
    println!("{}", "Output files:".bold());
    println!("  Cleaned dataset:    {}", paths.cleaned_data.display());
    println!("  Exclusion log:      {}", paths.exclusion_log.display());
    println!("  Cleaning report:    {}", paths.cleaning_report.display());
    println!();
}

/// Print the run summary as JSON for machine consumption
fn print_clean_summary_json(
    stats: &CleaningStats,
    paths: &OutputPaths,
    elapsed: std::time::Duration,
) -> Result<()> {
    let summary = serde_json::json!({
        "statistics": stats,
        "retention_rate": stats.retention_rate_formatted(),
        "processing_time_seconds": elapsed.as_secs_f64(),
        "output_files": {
            "cleaned_data": paths.cleaned_data.display().to_string(),
            "exclusion_log": paths.exclusion_log.display().to_string(),
            "cleaning_report": paths.cleaning_report.display().to_string(),
        }
    });

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Inspect a raw file's schema without processing it
async fn run_inspect(args: InspectArgs) -> Result<()> {
    let path = &args.input_path;
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    let file_name = path.display().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::csv_parsing(&file_name, "Failed to open CSV reader", Some(e)))?;

    let headers = reader
        .headers()
        .map_err(|e| Error::csv_parsing(&file_name, "Failed to read header row", Some(e)))?
        .clone();

    // Header analysis also verifies the required columns, so a structurally
    // unusable file fails inspection the same way it would fail a clean run.
    let mapping = ColumnMapping::analyze(&headers, &file_name)?;

    let mut sampled = 0usize;
    for row in reader.records().take(args.sample_rows) {
        row.map_err(|e| Error::csv_parsing(&file_name, "Failed to read record", Some(e)))?;
        sampled += 1;
    }

    match args.output_format {
        OutputFormat::Human => print_inspect_report(&file_name, &headers, &mapping, sampled),
        OutputFormat::Json => print_inspect_report_json(&file_name, &headers, &mapping, sampled)?,
    }

    Ok(())
}

/// Classify a source column for the inspection report
fn column_role(name: &str) -> &'static str {
    if REQUIRED_COLUMNS.contains(&name) {
        "required"
    } else if OPTIONAL_COLUMNS.contains(&name) {
        "optional"
    } else {
        "ignored"
    }
}

/// Print the human-readable inspection report
fn print_inspect_report(
    file_name: &str,
    headers: &csv::StringRecord,
    mapping: &ColumnMapping,
    sampled: usize,
) {
    println!();
    println!("{} {}", "Schema inspection:".bold(), file_name);
    println!();
    println!("{}", "Columns:".bold());
    for header in headers.iter() {
        let name = header.trim();
        let role = column_role(name);
        let role_colored = match role {
            "required" => role.green(),
            "optional" => role.cyan(),
            _ => role.dimmed(),
        };
        println!("  {:24} {}", name, role_colored);
    }

    let schema = &mapping.schema;
    println!();
    println!("{}", "Derived features that will apply:".bold());
    println!("  Temporal buckets:   always");
    println!(
        "  Distance features:  {}",
        enabled(schema.derives_distance_features())
    );
    println!("  Fare per km:        {}", enabled(schema.derives_fare_per_km()));
    println!(
        "  Tip percentage:     {}",
        enabled(schema.derives_tip_percentage())
    );
    println!();
    println!("Sampled {} data rows without structural errors", sampled);
    println!();
}

fn enabled(value: bool) -> colored::ColoredString {
    if value { "yes".green() } else { "no".dimmed() }
}

/// Print the inspection report as JSON
fn print_inspect_report_json(
    file_name: &str,
    headers: &csv::StringRecord,
    mapping: &ColumnMapping,
    sampled: usize,
) -> Result<()> {
    let columns: Vec<serde_json::Value> = headers
        .iter()
        .map(|header| {
            let name = header.trim();
            serde_json::json!({ "name": name, "role": column_role(name) })
        })
        .collect();

    let report = serde_json::json!({
        "file": file_name,
        "columns": columns,
        "schema": mapping.schema,
        "sampled_rows": sampled,
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
