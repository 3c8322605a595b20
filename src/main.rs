use clap::Parser;
use std::process;
use trip_processor::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Set up graceful shutdown handling
        let shutdown_signal = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");
        };

        // Run the main command, aborting cleanly on CTRL+C
        tokio::select! {
            result = commands::run(args) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(trip_processor::Error::processing_interrupted(
                    "Processing interrupted by user".to_string()
                ))
            }
        }
    });

    match result {
        Ok(()) => {
            // Success - the summary has already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Trip Processor - NYC Taxi Trip Data Cleaner");
    println!("===========================================");
    println!();
    println!("Clean raw NYC taxi trip CSV records into an analysis-ready dataset");
    println!("with derived features and a full audit trail of every exclusion.");
    println!();
    println!("USAGE:");
    println!("    trip-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    clean       Run the full cleaning pipeline over a raw trip file");
    println!("    inspect     Inspect a raw trip file's schema without processing it");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Clean a raw trip file into ./output:");
    println!("    trip-processor clean train.csv");
    println!();
    println!("    # Clean with a custom output directory and JSON summary:");
    println!("    trip-processor clean train.csv --output /data/cleaned --format json");
    println!();
    println!("    # Check which columns and derived features a file supports:");
    println!("    trip-processor inspect train.csv");
    println!();
    println!("For detailed help on any command, use:");
    println!("    trip-processor <COMMAND> --help");
}
