//! memtable model inspector
//!
//! Loads a JSON model file (entity types plus seed rows) into a fresh table
//! registry and prints one line per table.
//!
//! Usage:
//!   memtable --model model.json [--json] [--dump] [--sensitive-data-logging]

use anyhow::Result;
use clap::Parser;
use memtable_cli::{load_model_file, populate};
use memtable_storage::LoggingOptions;
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "memtable")]
#[command(about = "Load a memtable model file and inspect its tables")]
struct Args {
    /// Path to the JSON model file
    #[arg(short, long)]
    model: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Print every row of every table as JSON
    #[arg(long)]
    dump: bool,

    /// Include key values in errors and log output
    #[arg(long)]
    sensitive_data_logging: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    info!("Loading model from {}", args.model.display());
    let model = load_model_file(&args.model)?;
    let options =
        LoggingOptions::default().with_sensitive_data_logging(args.sensitive_data_logging);
    let loaded = populate(model, &options)?;

    if args.dump {
        println!("{}", serde_json::to_string_pretty(&loaded.dump())?);
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(&loaded.summaries())?);
    } else {
        for summary in loaded.summaries() {
            println!(
                "{:<24} key {:<24} {} rows",
                summary.entity_type, summary.key_shape, summary.rows
            );
        }
    }
    Ok(())
}
