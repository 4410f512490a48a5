//! # GrowthIQ
//!
//! Sales forecasting and strategy simulation for small retail businesses.
//!
//! - [`sales_forecast`]: history loading, forecasting models, accuracy
//!   metrics and the persisted model artifact
//! - [`strategy_sim`]: currency normalization, trend analysis, scenario
//!   simulation and the CSV report
//!
//! ```
//! use growthiq_workspace::strategy_sim::{Currency, Scenario};
//!
//! assert_eq!(Currency::Inr.convert(10.0), 840.0);
//! assert_eq!(Scenario::classify(12.0), Scenario::AggressiveExpansion);
//! ```

pub use sales_forecast;
pub use strategy_sim;

pub use sales_forecast::{ForecastPoint, ForecastWindow, SalesHistory};
pub use strategy_sim::{Currency, Dashboard, DashboardConfig, DashboardReport, Scenario};
