//! Forecasting models for daily revenue

use crate::data::SalesHistory;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use std::fmt::Debug;

/// Default width of the forecast confidence interval
pub const DEFAULT_INTERVAL_WIDTH: f64 = 0.80;

/// One forecasted day with its uncertainty range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    date: NaiveDate,
    estimate: f64,
    lower_bound: f64,
    upper_bound: f64,
}

impl ForecastPoint {
    /// Create a forecast point, enforcing `lower_bound <= estimate <= upper_bound`
    pub fn new(date: NaiveDate, estimate: f64, lower_bound: f64, upper_bound: f64) -> Result<Self> {
        if !(estimate.is_finite() && lower_bound.is_finite() && upper_bound.is_finite()) {
            return Err(ForecastError::ValidationError(format!(
                "Forecast for {} contains non-finite values",
                date
            )));
        }

        if lower_bound > estimate || estimate > upper_bound {
            return Err(ForecastError::ValidationError(format!(
                "Forecast for {} violates lower <= estimate <= upper ({} <= {} <= {})",
                date, lower_bound, estimate, upper_bound
            )));
        }

        Ok(Self {
            date,
            estimate,
            lower_bound,
            upper_bound,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    /// Multiply every amount by a non-negative, finite factor
    ///
    /// A negative factor would invert the bounds and is rejected, as is a
    /// product that overflows.
    pub fn scaled(&self, factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Scale factor must be finite and non-negative, got {}",
                factor
            )));
        }

        Self::new(
            self.date,
            self.estimate * factor,
            self.lower_bound * factor,
            self.upper_bound * factor,
        )
    }
}

/// Non-empty, chronologically ordered run of forecast points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastWindow {
    points: Vec<ForecastPoint>,
}

impl ForecastWindow {
    /// Create a window; dates must be strictly increasing
    pub fn new(points: Vec<ForecastPoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(ForecastError::ValidationError(
                "Forecast window must contain at least one point".to_string(),
            ));
        }

        if let Some(pair) = points.windows(2).find(|pair| pair[1].date <= pair[0].date) {
            return Err(ForecastError::ValidationError(format!(
                "Forecast dates must be strictly increasing, found {} after {}",
                pair[1].date, pair[0].date
            )));
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// Number of forecast days
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with collections
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> &ForecastPoint {
        &self.points[0]
    }

    pub fn last(&self) -> &ForecastPoint {
        &self.points[self.points.len() - 1]
    }

    pub fn estimates(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.estimate).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForecastPoint> {
        self.points.iter()
    }

    /// Apply `ForecastPoint::scaled` to every point
    pub fn scaled(&self, factor: f64) -> Result<Self> {
        let points = self
            .points
            .iter()
            .map(|p| p.scaled(factor))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { points })
    }
}

impl<'a> IntoIterator for &'a ForecastWindow {
    type Item = &'a ForecastPoint;
    type IntoIter = std::slice::Iter<'a, ForecastPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Two-sided standard normal quantile for a central interval of `width`
pub fn interval_z_score(width: f64) -> Result<f64> {
    if width <= 0.0 || width >= 1.0 {
        return Err(ForecastError::InvalidParameter(
            "Interval width must be between 0 and 1".to_string(),
        ));
    }

    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| ForecastError::ForecastingError(format!("Normal distribution: {}", e)))?;
    Ok(normal.inverse_cdf(0.5 + width / 2.0))
}

/// Build a window from point estimates, widening the interval with sqrt(h)
pub(crate) fn window_from_estimates(
    last_date: NaiveDate,
    estimates: &[f64],
    residual_std: f64,
    z_score: f64,
) -> Result<ForecastWindow> {
    let dates = crate::utils::future_dates(last_date, estimates.len())?;

    let points = dates
        .into_iter()
        .zip(estimates.iter())
        .enumerate()
        .map(|(i, (date, &estimate))| {
            let margin = z_score * residual_std * ((i + 1) as f64).sqrt();
            ForecastPoint::new(date, estimate, estimate - margin, estimate + margin)
        })
        .collect::<Result<Vec<_>>>()?;

    ForecastWindow::new(points)
}

/// Standard deviation of one-step-ahead residuals
pub(crate) fn residual_std(actual: &[f64], fitted: &[f64]) -> f64 {
    let n = actual.len().min(fitted.len());
    if n < 2 {
        return 0.0;
    }

    let residuals: Vec<f64> = actual.iter().zip(fitted.iter()).map(|(a, f)| a - f).collect();
    let mean = residuals.iter().sum::<f64>() / n as f64;
    let variance = residuals.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Forecast exactly `horizon` days strictly after the last training date
    fn forecast(&self, horizon: usize) -> Result<ForecastWindow>;

    /// In-sample fitted values for the given history
    fn predict(&self, data: &SalesHistory) -> Result<Vec<f64>>;

    /// Last date seen during training
    fn last_date(&self) -> NaiveDate;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on sales history
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on sales history
    fn train(&self, data: &SalesHistory) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod exponential_smoothing;
pub mod linear_trend;
pub mod persistence;
