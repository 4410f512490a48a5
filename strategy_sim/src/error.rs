//! Error types for the strategy_sim crate

use sales_forecast::ForecastError;
use thiserror::Error;

/// Errors surfaced by the dashboard pipeline
#[derive(Debug, Error)]
pub enum SimulationError {
    /// No trained model could be loaded; nothing was forecast
    #[error("Model unavailable: {0}. Run the training step first.")]
    ModelUnavailable(String),

    /// A user-supplied control was out of range or unknown
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Error from the forecast source
    #[error("Forecast failed: {0}")]
    Forecast(ForecastError),

    /// Error while writing or reading the CSV report
    #[error("Report error: {0}")]
    Report(String),

    /// Error in the dashboard configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, SimulationError>;

impl From<ForecastError> for SimulationError {
    fn from(err: ForecastError) -> Self {
        match err {
            ForecastError::ModelUnavailable(reason) => SimulationError::ModelUnavailable(reason),
            other => SimulationError::Forecast(other),
        }
    }
}

impl From<csv::Error> for SimulationError {
    fn from(err: csv::Error) -> Self {
        SimulationError::Report(err.to_string())
    }
}
