//! `growthiq` command line entry point
//!
//! ```text
//! growthiq sample-data --out sales_data.csv
//! growthiq train --data sales_data.csv --method trend
//! growthiq forecast --days 45 --currency INR --export forecast_report.csv
//! ```

mod cli;
mod commands;
mod present;

use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    // a missing .env is fine
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = cli::Cli::parse();
    debug!(?cli, "Parsed arguments");

    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
