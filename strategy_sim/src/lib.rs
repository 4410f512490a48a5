//! # Strategy Sim
//!
//! Turns a revenue forecast into a recommendation: the forecast is converted
//! to the display currency, reduced to trend statistics, classified into a
//! business scenario and simulated under that scenario's intervention.
//!
//! ```
//! use strategy_sim::scenario::{simulate, Scenario, DEFAULT_BASE_MARGIN};
//!
//! let result = simulate(1000.0, -10.0, DEFAULT_BASE_MARGIN);
//! assert_eq!(result.scenario, Scenario::DefensiveRetention);
//! assert!((result.simulated_revenue - 1125.0).abs() < 1e-9);
//! assert!((result.simulated_profit - 225.0).abs() < 1e-9);
//! ```

pub mod config;
pub mod currency;
pub mod dashboard;
pub mod error;
pub mod report;
pub mod scenario;
pub mod trend;
pub mod weekday;

pub use crate::config::DashboardConfig;
pub use crate::currency::Currency;
pub use crate::dashboard::{build_report, Dashboard, DashboardReport, DashboardRequest};
pub use crate::error::{Result, SimulationError};
pub use crate::scenario::{simulate, simulate_with, Scenario, SimulationAssumptions, SimulationResult};
pub use crate::trend::TrendSummary;
