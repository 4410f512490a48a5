//! # Sales Forecast
//!
//! Daily revenue forecasting for small retail businesses.
//!
//! ## Features
//!
//! - Sales export loading (`Date`, `Price`, `Units_Sold` or a `Sales` column)
//! - Forecasting models (Holt linear smoothing, linear trend with weekly seasonality)
//! - Forecast windows with confidence intervals
//! - Hold-out accuracy metrics
//! - A JSON model artifact and a lazily loaded, read-only model handle
//!
//! ## Quick Start
//!
//! ```no_run
//! use sales_forecast::data::DataLoader;
//! use sales_forecast::models::exponential_smoothing::HoltLinear;
//! use sales_forecast::models::persistence::{ModelArtifact, ModelStore};
//! use sales_forecast::models::{ForecastModel, TrainedForecastModel};
//!
//! # fn main() -> sales_forecast::Result<()> {
//! let history = DataLoader::from_csv("sales_data.csv")?;
//! let trained = HoltLinear::new(0.3, 0.1)?.train(&history)?;
//! ModelArtifact::new(trained, history.len()).save("forecast_model.json")?;
//!
//! let store = ModelStore::new("forecast_model.json");
//! let window = store.artifact()?.model.forecast(30)?;
//! assert_eq!(window.len(), 30);
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod error;
pub mod metrics;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use crate::data::{DataLoader, SalesHistory};
pub use crate::error::{ForecastError, Result};
pub use crate::models::persistence::{ModelArtifact, ModelState, ModelStore, SavedModel};
pub use crate::models::{ForecastModel, ForecastPoint, ForecastWindow, TrainedForecastModel};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
