//! Metrics for evaluating forecast accuracy

use crate::data::SalesHistory;
use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, TrainedForecastModel};

/// Forecast accuracy metrics
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastAccuracy {
    /// Mean Absolute Error
    pub mae: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error, over non-zero actuals
    pub mape: f64,
}

/// Calculate accuracy metrics for a forecast vs actual values
pub fn forecast_accuracy(forecast: &[f64], actual: &[f64]) -> Result<ForecastAccuracy> {
    if forecast.len() != actual.len() || forecast.is_empty() {
        return Err(ForecastError::ValidationError(
            "Forecast and actual values must have the same non-zero length".to_string(),
        ));
    }

    let n = forecast.len() as f64;
    let errors: Vec<f64> = forecast
        .iter()
        .zip(actual.iter())
        .map(|(&f, &a)| a - f)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let rmse = (errors.iter().map(|e| e.powi(2)).sum::<f64>() / n).sqrt();

    let (pct_sum, pct_count) = actual
        .iter()
        .zip(errors.iter())
        .filter(|(&a, _)| a != 0.0)
        .fold((0.0, 0usize), |(sum, count), (&a, &e)| {
            (sum + (e.abs() / a.abs()) * 100.0, count + 1)
        });
    let mape = if pct_count > 0 {
        pct_sum / pct_count as f64
    } else {
        0.0
    };

    Ok(ForecastAccuracy { mae, rmse, mape })
}

/// Train on the leading part of the history and score the held-out tail
///
/// Forecasts run over calendar days, so each held-out observation is scored
/// against the forecast for its own date. Days missing from the history are
/// skipped rather than shifting the comparison.
pub fn evaluate_holdout<M: ForecastModel>(
    model: &M,
    history: &SalesHistory,
    test_ratio: f64,
) -> Result<ForecastAccuracy> {
    if test_ratio <= 0.0 || test_ratio >= 1.0 {
        return Err(ForecastError::InvalidParameter(
            "Test ratio must be between 0 and 1".to_string(),
        ));
    }

    let observations = history.observations();
    let revenue: Vec<f64> = observations.iter().map(|(_, v)| *v).collect();
    let (train, test) = crate::utils::train_test_split(&revenue, test_ratio);
    if train.len() < 2 || test.is_empty() {
        return Err(ForecastError::DataError(format!(
            "History of {} days is too short for a hold-out split",
            revenue.len()
        )));
    }

    let trained = model.train(&history.slice(0, Some(train.len()))?)?;
    let train_end = trained.last_date();
    let held_out = &observations[train.len()..];

    let test_end = held_out[held_out.len() - 1].0;
    let horizon = (test_end - train_end).num_days();
    if horizon < 1 {
        return Err(ForecastError::ValidationError(format!(
            "Held-out data must follow the training end {}",
            train_end
        )));
    }
    let forecast = trained.forecast(horizon as usize)?;

    let predicted = held_out
        .iter()
        .map(|(date, _)| {
            let offset = (*date - train_end).num_days() - 1;
            usize::try_from(offset)
                .ok()
                .and_then(|i| forecast.points().get(i))
                .filter(|point| point.date() == *date)
                .map(|point| point.estimate())
                .ok_or_else(|| {
                    ForecastError::ForecastingError(format!("No forecast for held-out date {}", date))
                })
        })
        .collect::<Result<Vec<f64>>>()?;

    forecast_accuracy(&predicted, &test)
}

impl std::fmt::Display for ForecastAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Accuracy Metrics:")?;
        writeln!(f, "  MAE:   {:.2}", self.mae)?;
        writeln!(f, "  RMSE:  {:.2}", self.rmse)?;
        writeln!(f, "  MAPE:  {:.2}%", self.mape)?;
        Ok(())
    }
}
