//! Exponential smoothing models for daily revenue forecasting

use crate::data::SalesHistory;
use crate::error::{ForecastError, Result};
use crate::models::{
    interval_z_score, residual_std, window_from_estimates, ForecastModel, ForecastWindow,
    TrainedForecastModel, DEFAULT_INTERVAL_WIDTH,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Holt's linear exponential smoothing (level + trend)
#[derive(Debug, Clone)]
pub struct HoltLinear {
    /// Name of the model
    name: String,
    /// Level smoothing parameter
    alpha: f64,
    /// Trend smoothing parameter
    beta: f64,
    /// Central width of the confidence interval
    interval_width: f64,
}

/// Trained Holt model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedHoltLinear {
    name: String,
    alpha: f64,
    beta: f64,
    /// Final smoothed level
    level: f64,
    /// Final smoothed trend (per day)
    trend: f64,
    residual_std: f64,
    z_score: f64,
    last_date: NaiveDate,
}

impl HoltLinear {
    /// Create a new Holt model
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        Self::with_interval_width(alpha, beta, DEFAULT_INTERVAL_WIDTH)
    }

    /// Create a new Holt model with a custom confidence interval width
    pub fn with_interval_width(alpha: f64, beta: f64, interval_width: f64) -> Result<Self> {
        if alpha <= 0.0 || alpha >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Alpha must be between 0 and 1".to_string(),
            ));
        }
        if beta <= 0.0 || beta >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Beta must be between 0 and 1".to_string(),
            ));
        }
        interval_z_score(interval_width)?;

        Ok(Self {
            name: format!("Holt Linear (alpha={}, beta={})", alpha, beta),
            alpha,
            beta,
            interval_width,
        })
    }
}

/// Run the Holt recursions over dated observations
///
/// One step is one calendar day. Days without an observation advance the
/// level along the trend and leave the trend unchanged, so the final trend
/// is per day even when the history skips days. Returns one-step-ahead fits
/// (one per observation) and the final state.
fn smooth(observations: &[(NaiveDate, f64)], alpha: f64, beta: f64) -> (Vec<f64>, f64, f64) {
    let (first_date, first_value) = observations[0];
    let mut level = first_value;
    let mut trend = match observations.get(1) {
        Some(&(date, value)) => (value - first_value) / (date - first_date).num_days() as f64,
        None => 0.0,
    };

    let mut fitted = Vec::with_capacity(observations.len());
    fitted.push(first_value);

    for pair in observations.windows(2) {
        let (previous_date, _) = pair[0];
        let (date, value) = pair[1];
        let skipped = (date - previous_date).num_days() - 1;
        level += trend * skipped as f64;

        fitted.push(level + trend);
        let previous_level = level;
        level = alpha * value + (1.0 - alpha) * (level + trend);
        trend = beta * (level - previous_level) + (1.0 - beta) * trend;
    }

    (fitted, level, trend)
}

impl ForecastModel for HoltLinear {
    type Trained = TrainedHoltLinear;

    fn train(&self, data: &SalesHistory) -> Result<Self::Trained> {
        let observations = data.observations();
        if observations.len() < 2 {
            return Err(ForecastError::DataError(
                "Holt smoothing needs at least 2 days of history".to_string(),
            ));
        }
        let last_date = observations[observations.len() - 1].0;
        let revenue: Vec<f64> = observations.iter().map(|(_, v)| *v).collect();

        let (fitted, level, trend) = smooth(&observations, self.alpha, self.beta);
        let residual_std = residual_std(&revenue[1..], &fitted[1..]);
        debug!(level, trend, residual_std, "Trained Holt model");

        Ok(TrainedHoltLinear {
            name: self.name.clone(),
            alpha: self.alpha,
            beta: self.beta,
            level,
            trend,
            residual_std,
            z_score: interval_z_score(self.interval_width)?,
            last_date,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedHoltLinear {
    /// Smoothed trend per day
    pub fn trend(&self) -> f64 {
        self.trend
    }
}

impl TrainedForecastModel for TrainedHoltLinear {
    fn forecast(&self, horizon: usize) -> Result<ForecastWindow> {
        let estimates: Vec<f64> = (1..=horizon)
            .map(|h| self.level + h as f64 * self.trend)
            .collect();

        window_from_estimates(self.last_date, &estimates, self.residual_std, self.z_score)
    }

    fn predict(&self, data: &SalesHistory) -> Result<Vec<f64>> {
        let observations = data.observations();
        if observations.is_empty() {
            return Err(ForecastError::DataError("Empty sales history".to_string()));
        }

        Ok(smooth(&observations, self.alpha, self.beta).0)
    }

    fn last_date(&self) -> NaiveDate {
        self.last_date
    }

    fn name(&self) -> &str {
        &self.name
    }
}
