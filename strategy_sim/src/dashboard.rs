//! One forecast request end to end
//!
//! normalize → analyze → classify/simulate, producing plain data for the
//! presentation layer. A request either yields a complete report or an error.

use crate::config::DashboardConfig;
use crate::currency::Currency;
use crate::error::{Result, SimulationError};
use crate::report::{export_report, report_rows, ReportRow};
use crate::scenario::{simulate_with, SimulationResult};
use crate::trend::TrendSummary;
use crate::weekday::{weekday_profile, WeekdayAverage};
use sales_forecast::{ForecastWindow, ModelState, ModelStore, TrainedForecastModel};
use tracing::{debug, info};

/// User controls for one forecast run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardRequest {
    pub currency: Currency,
    pub horizon_days: usize,
}

/// Everything the presentation layer needs for one run
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardReport {
    pub currency: Currency,
    pub model_name: String,
    /// Forecast in the display currency
    pub window: ForecastWindow,
    pub summary: TrendSummary,
    pub simulation: SimulationResult,
    /// Recommended action under the configured assumptions
    pub recommendation: String,
    pub weekdays: Vec<WeekdayAverage>,
}

impl DashboardReport {
    pub fn report_rows(&self) -> Vec<ReportRow> {
        report_rows(&self.window)
    }

    /// CSV report bytes for download
    pub fn export_csv(&self) -> Result<Vec<u8>> {
        export_report(&self.window, self.currency)
    }
}

/// Run the analysis pipeline against an already trained model
pub fn build_report(
    model: &dyn TrainedForecastModel,
    request: &DashboardRequest,
    config: &DashboardConfig,
) -> Result<DashboardReport> {
    let forecast = model.forecast(request.horizon_days)?;
    if forecast.len() != request.horizon_days {
        return Err(SimulationError::Forecast(
            sales_forecast::ForecastError::ForecastingError(format!(
                "Model returned {} points for a {} day horizon",
                forecast.len(),
                request.horizon_days
            )),
        ));
    }

    let window = request.currency.normalize_window(&forecast)?;
    let summary = TrendSummary::from_window(&window);
    let simulation = simulate_with(
        &config.assumptions,
        summary.total,
        summary.growth_pct,
        config.base_margin,
    );
    debug!(
        total = summary.total,
        growth_pct = summary.growth_pct,
        scenario = %simulation.scenario,
        "Simulated strategy"
    );

    Ok(DashboardReport {
        currency: request.currency,
        model_name: model.name().to_string(),
        recommendation: config.assumptions.recommendation(simulation.scenario),
        weekdays: weekday_profile(&window),
        window,
        summary,
        simulation,
    })
}

/// Dashboard session: configuration plus the shared model handle
#[derive(Debug)]
pub struct Dashboard {
    config: DashboardConfig,
    store: ModelStore,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        let store = ModelStore::new(config.model_path.clone());
        Self { config, store }
    }

    pub fn with_store(config: DashboardConfig, store: ModelStore) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Loads the model on first call
    pub fn model_state(&self) -> &ModelState {
        self.store.state()
    }

    /// Fill unset controls from the configuration
    pub fn request(&self, currency: Option<Currency>, horizon_days: Option<usize>) -> DashboardRequest {
        DashboardRequest {
            currency: currency.unwrap_or(self.config.currency),
            horizon_days: horizon_days.unwrap_or(self.config.default_horizon_days),
        }
    }

    pub fn validate_request(&self, request: &DashboardRequest) -> Result<()> {
        let bounds = self.config.min_horizon_days..=self.config.max_horizon_days;
        if !bounds.contains(&request.horizon_days) {
            return Err(SimulationError::InvalidRequest(format!(
                "Forecast horizon must be between {} and {} days, got {}",
                bounds.start(),
                bounds.end(),
                request.horizon_days
            )));
        }
        Ok(())
    }

    /// Generate a full report, or fail without partial output
    pub fn run(&self, request: &DashboardRequest) -> Result<DashboardReport> {
        let artifact = self.store.artifact()?;
        self.validate_request(request)?;

        info!(
            currency = request.currency.code(),
            horizon_days = request.horizon_days,
            "Generating strategic forecast"
        );
        build_report(&artifact.model, request, &self.config)
    }
}
