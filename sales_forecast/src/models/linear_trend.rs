//! Least-squares trend with weekly seasonality

use crate::data::SalesHistory;
use crate::error::{ForecastError, Result};
use crate::models::{
    interval_z_score, residual_std, window_from_estimates, ForecastModel, ForecastWindow,
    TrainedForecastModel, DEFAULT_INTERVAL_WIDTH,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Linear trend plus additive day-of-week offsets
#[derive(Debug, Clone)]
pub struct LinearTrend {
    /// Name of the model
    name: String,
    /// Fit day-of-week offsets on top of the trend
    weekly_seasonality: bool,
    interval_width: f64,
}

/// Trained linear trend model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedLinearTrend {
    name: String,
    intercept: f64,
    /// Revenue change per day
    slope: f64,
    /// Offsets indexed by days from Monday
    weekday_offsets: [f64; 7],
    residual_std: f64,
    z_score: f64,
    first_date: NaiveDate,
    last_date: NaiveDate,
}

impl LinearTrend {
    /// Create a new trend model with weekly seasonality enabled
    pub fn new() -> Self {
        Self {
            name: "Linear Trend (weekly seasonality)".to_string(),
            weekly_seasonality: true,
            interval_width: DEFAULT_INTERVAL_WIDTH,
        }
    }

    /// Disable the day-of-week offsets
    pub fn without_seasonality(mut self) -> Self {
        self.name = "Linear Trend".to_string();
        self.weekly_seasonality = false;
        self
    }

    /// Set the confidence interval width
    pub fn with_interval_width(mut self, interval_width: f64) -> Result<Self> {
        interval_z_score(interval_width)?;
        self.interval_width = interval_width;
        Ok(self)
    }
}

impl Default for LinearTrend {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordinary least squares fit of `y = intercept + slope * x`
fn least_squares(x: &[f64], y: &[f64]) -> Result<(f64, f64)> {
    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        numerator += (xi - x_mean) * (yi - y_mean);
        denominator += (xi - x_mean) * (xi - x_mean);
    }

    if denominator.abs() < 1e-10 {
        return Err(ForecastError::ForecastingError(
            "Cannot calculate slope: dates are too similar".to_string(),
        ));
    }

    let slope = numerator / denominator;
    Ok((y_mean - slope * x_mean, slope))
}

impl TrainedLinearTrend {
    fn value_at(&self, date: NaiveDate) -> f64 {
        let x = (date - self.first_date).num_days() as f64;
        let weekday = date.weekday().num_days_from_monday() as usize;
        self.intercept + self.slope * x + self.weekday_offsets[weekday]
    }

    /// Revenue change per day
    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn weekday_offsets(&self) -> &[f64; 7] {
        &self.weekday_offsets
    }
}

impl ForecastModel for LinearTrend {
    type Trained = TrainedLinearTrend;

    fn train(&self, data: &SalesHistory) -> Result<Self::Trained> {
        let observations = data.observations();
        if observations.len() < 2 {
            return Err(ForecastError::DataError(
                "Linear trend needs at least 2 days of history".to_string(),
            ));
        }

        let first_date = observations[0].0;
        let last_date = observations[observations.len() - 1].0;
        let x: Vec<f64> = observations
            .iter()
            .map(|(d, _)| (*d - first_date).num_days() as f64)
            .collect();
        let y: Vec<f64> = observations.iter().map(|(_, v)| *v).collect();

        let (intercept, slope) = least_squares(&x, &y)?;

        let mut weekday_offsets = [0.0; 7];
        if self.weekly_seasonality {
            let mut sums = [0.0; 7];
            let mut counts = [0usize; 7];
            for ((date, value), xi) in observations.iter().zip(x.iter()) {
                let idx = date.weekday().num_days_from_monday() as usize;
                sums[idx] += value - (intercept + slope * xi);
                counts[idx] += 1;
            }
            for idx in 0..7 {
                if counts[idx] > 0 {
                    weekday_offsets[idx] = sums[idx] / counts[idx] as f64;
                }
            }
        }

        let mut trained = TrainedLinearTrend {
            name: self.name.clone(),
            intercept,
            slope,
            weekday_offsets,
            residual_std: 0.0,
            z_score: interval_z_score(self.interval_width)?,
            first_date,
            last_date,
        };
        let fitted: Vec<f64> = observations
            .iter()
            .map(|(d, _)| trained.value_at(*d))
            .collect();
        trained.residual_std = residual_std(&y, &fitted);

        debug!(intercept, slope, residual_std = trained.residual_std, "Trained linear trend");
        Ok(trained)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForecastModel for TrainedLinearTrend {
    fn forecast(&self, horizon: usize) -> Result<ForecastWindow> {
        let dates = crate::utils::future_dates(self.last_date, horizon)?;
        let estimates: Vec<f64> = dates.iter().map(|d| self.value_at(*d)).collect();

        window_from_estimates(self.last_date, &estimates, self.residual_std, self.z_score)
    }

    fn predict(&self, data: &SalesHistory) -> Result<Vec<f64>> {
        if data.is_empty() {
            return Err(ForecastError::DataError("Empty sales history".to_string()));
        }

        Ok(data.dates().into_iter().map(|d| self.value_at(d)).collect())
    }

    fn last_date(&self) -> NaiveDate {
        self.last_date
    }

    fn name(&self) -> &str {
        &self.name
    }
}
