//! Utility functions for the sales_forecast crate

use crate::data::{SalesHistory, HISTORY_DATE_FORMAT};
use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::path::Path;

/// Split a series into training and test sets
pub fn train_test_split(data: &[f64], test_ratio: f64) -> (Vec<f64>, Vec<f64>) {
    if data.is_empty() || test_ratio <= 0.0 || test_ratio >= 1.0 {
        return (data.to_vec(), Vec::new());
    }

    let test_size = (data.len() as f64 * test_ratio).round() as usize;
    let train_size = data.len() - test_size;

    (data[..train_size].to_vec(), data[train_size..].to_vec())
}

/// Consecutive calendar days strictly after `last_date`
pub fn future_dates(last_date: NaiveDate, horizon: usize) -> Result<Vec<NaiveDate>> {
    let mut dates = Vec::with_capacity(horizon);
    let mut current = last_date;

    for _ in 0..horizon {
        current = current.succ_opt().ok_or_else(|| {
            ForecastError::ValidationError(format!("Date overflow after {}", current))
        })?;
        dates.push(current);
    }

    Ok(dates)
}

/// One row of a raw sales export
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub date: NaiveDate,
    pub price: f64,
    pub units_sold: u32,
}

/// Generate a synthetic daily sales export
///
/// Units follow a linear trend with a weekend lift and gaussian noise.
pub fn generate_sample_records(
    start: NaiveDate,
    days: usize,
    base_units: f64,
    daily_growth: f64,
    seed: u64,
) -> Result<Vec<SaleRecord>> {
    if base_units <= 0.0 {
        return Err(ForecastError::InvalidParameter(
            "Base units must be positive".to_string(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, base_units * 0.08)
        .map_err(|e| ForecastError::InvalidParameter(format!("Noise distribution: {}", e)))?;

    let mut records = Vec::with_capacity(days);
    let mut date = start;
    for day in 0..days {
        let weekend_lift = match date.weekday() {
            Weekday::Sat | Weekday::Sun => 1.25,
            _ => 1.0,
        };
        let expected = (base_units + daily_growth * day as f64) * weekend_lift;
        let units = (expected + noise.sample(&mut rng)).round().max(0.0) as u32;
        let price = 20.0 + rng.gen_range(-0.5..0.5);

        records.push(SaleRecord {
            date,
            price: (price * 100.0_f64).round() / 100.0,
            units_sold: units,
        });

        date = date.succ_opt().ok_or_else(|| {
            ForecastError::ValidationError(format!("Date overflow after {}", date))
        })?;
    }

    Ok(records)
}

/// Convert raw records into a daily revenue history
pub fn records_to_history(records: &[SaleRecord]) -> Result<SalesHistory> {
    let dates = records.iter().map(|r| r.date).collect();
    let revenue = records
        .iter()
        .map(|r| r.price * r.units_sold as f64)
        .collect();
    SalesHistory::new(dates, revenue)
}

/// Write records as a `Date,Price,Units_Sold` CSV in day-month-year format
pub fn write_sales_csv<P: AsRef<Path>>(path: P, records: &[SaleRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| ForecastError::DataError(format!("Cannot create CSV: {}", e)))?;

    let write_err = |e: csv::Error| ForecastError::DataError(format!("CSV write failed: {}", e));
    writer
        .write_record(["Date", "Price", "Units_Sold"])
        .map_err(write_err)?;
    for record in records {
        writer
            .write_record([
                record.date.format(HISTORY_DATE_FORMAT).to_string(),
                format!("{:.2}", record.price),
                record.units_sold.to_string(),
            ])
            .map_err(write_err)?;
    }
    writer.flush()?;

    Ok(())
}
