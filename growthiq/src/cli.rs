use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use strategy_sim::Currency;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sales forecasting and strategy simulation", long_about = None)]
pub struct Cli {
    /// Dashboard config (TOML). Falls back to GROWTHIQ_CONFIG, then defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fit a model on a sales export and save the artifact
    Train(TrainArgs),
    /// Forecast revenue and simulate the recommended strategy
    Forecast(ForecastArgs),
    /// Write a synthetic sales export
    SampleData(SampleDataArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Holt linear exponential smoothing
    Holt,
    /// Linear trend with weekday offsets
    Trend,
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Sales CSV with Date (DD-MM-YYYY) plus Price/Units_Sold or Sales
    #[arg(long)]
    pub data: PathBuf,

    /// Where to write the model; defaults to the configured model path
    #[arg(long)]
    pub model: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Method::Holt)]
    pub method: Method,

    /// Level smoothing for the Holt model
    #[arg(long, default_value_t = 0.3)]
    pub alpha: f64,

    /// Trend smoothing for the Holt model
    #[arg(long, default_value_t = 0.1)]
    pub beta: f64,

    /// Share of the history held out for accuracy metrics
    #[arg(long, default_value_t = 0.2)]
    pub holdout: f64,
}

#[derive(Args, Debug)]
pub struct ForecastArgs {
    /// Forecast horizon in days
    #[arg(long)]
    pub days: Option<usize>,

    /// Display currency (USD or INR)
    #[arg(long, value_parser = parse_currency)]
    pub currency: Option<Currency>,

    /// Model artifact; defaults to the configured model path
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Also write the CSV report to this path
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SampleDataArgs {
    #[arg(long, default_value = "sales_data.csv")]
    pub out: PathBuf,

    /// First day of the export (YYYY-MM-DD)
    #[arg(long, default_value = "2024-01-01")]
    pub start: NaiveDate,

    #[arg(long, default_value_t = 365)]
    pub days: usize,

    /// Units sold on the first weekday
    #[arg(long, default_value_t = 120.0)]
    pub base_units: f64,

    /// Extra units per day
    #[arg(long, default_value_t = 0.15)]
    pub daily_growth: f64,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

fn parse_currency(value: &str) -> Result<Currency, String> {
    value.parse::<Currency>().map_err(|e| e.to_string())
}
