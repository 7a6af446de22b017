//! Reference tickers export binary.
//!
//! Merges the company records of a Parquet file and a protobuf file into a date-stamped CSV
//! file, ordered by ticker.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::Parser;
use tickers_config::Environment;
use tickers_export::config::{ExportOverrides, load_export_config};
use tickers_export::start_export;
use tickers_telemetry::tracing::init_tracing;
use tracing::{error, info};

/// Reference tickers export - merges Parquet and protobuf company records into one CSV file.
#[derive(Parser, Debug)]
#[command(name = "tickers-export")]
#[command(about = "Merges Parquet and protobuf company records into a date-stamped CSV file")]
struct Args {
    /// Directory holding `base.yaml` and optional environment overrides (built-in defaults if unset)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Parquet input file (default: hampton-deville.parquet)
    #[arg(long)]
    parquet_path: Option<PathBuf>,

    /// Protobuf input file (default: reference-tickers.hooli)
    #[arg(long)]
    protobuf_path: Option<PathBuf>,

    /// Directory the CSV file is written to (default: current directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Date embedded in the output file name, as YYYY-MM-DD (default: today, local time)
    #[arg(long)]
    run_date: Option<NaiveDate>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let environment = match Environment::load() {
        Ok(environment) => environment,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_tracing(env!("CARGO_BIN_NAME"), environment) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match run(args, environment) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args, environment: Environment) -> anyhow::Result<()> {
    let overrides = ExportOverrides {
        parquet_path: args.parquet_path,
        protobuf_path: args.protobuf_path,
        output_dir: args.output_dir,
    };
    let config = load_export_config(args.config_dir.as_deref(), environment, overrides)?;

    let run_date = args
        .run_date
        .unwrap_or_else(|| Local::now().date_naive());

    let report = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(start_export(&config, run_date))?;

    match report.output_path {
        Some(path) => println!("file generated: {}", path.display()),
        None => info!(
            rows = report.summary.written_rows,
            "export finished without writing a file"
        ),
    }

    Ok(())
}
