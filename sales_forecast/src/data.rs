//! Daily sales history handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Date format used by the sales export (day-month-year)
pub const HISTORY_DATE_FORMAT: &str = "%d-%m-%Y";

const DATE_COLUMN: &str = "date";
const REVENUE_COLUMN: &str = "revenue";

/// Chronologically ordered daily revenue series
///
/// Every date appears at most once and dates are strictly increasing.
#[derive(Debug, Clone)]
pub struct SalesHistory {
    /// Data frame with a `date` (Date) and a `revenue` (Float64) column
    df: DataFrame,
}

/// Data loader for raw sales exports
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load sales history from a CSV file
    ///
    /// The file needs a date column in day-month-year format and either a
    /// revenue column (`Sales` / `Revenue`) or `Price` and `Units_Sold`.
    /// Rows sharing a date are summed into one daily total.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<SalesHistory> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        info!(path = %path.display(), rows = df.height(), "Loaded sales export");
        Self::from_dataframe(df)
    }

    /// Create sales history from an existing raw DataFrame
    pub fn from_dataframe(df: DataFrame) -> Result<SalesHistory> {
        let date_column = Self::detect_date_column(&df)?;
        let dates = Self::parse_dates(&df, &date_column)?;
        let revenue = Self::derive_revenue(&df)?;

        let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for (date, value) in dates.into_iter().zip(revenue) {
            *daily.entry(date).or_insert(0.0) += value;
        }

        if daily.is_empty() {
            return Err(ForecastError::DataError(
                "Sales export contains no rows".to_string(),
            ));
        }

        debug!(days = daily.len(), "Aggregated sales into daily totals");
        let (dates, revenue) = daily.into_iter().unzip();
        SalesHistory::new(dates, revenue)
    }

    /// Detect the date column in a DataFrame
    fn detect_date_column(df: &DataFrame) -> Result<String> {
        df.get_column_names()
            .into_iter()
            .find(|name| {
                let lower = name.to_lowercase();
                lower.contains("date") || lower == "ds" || lower == "day"
            })
            .map(|name| name.to_string())
            .ok_or_else(|| ForecastError::DataError("No date column found in data".to_string()))
    }

    /// Find the first column whose lowercased name contains one of the patterns
    fn find_column(df: &DataFrame, patterns: &[&str]) -> Option<String> {
        df.get_column_names()
            .into_iter()
            .find(|name| {
                let lower = name.to_lowercase();
                patterns.iter().any(|p| lower.contains(p))
            })
            .map(|name| name.to_string())
    }

    fn parse_dates(df: &DataFrame, column_name: &str) -> Result<Vec<NaiveDate>> {
        let col = df.column(column_name)?.cast(&DataType::Utf8)?;
        let values = col.utf8()?;

        values
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                let raw = value.ok_or_else(|| {
                    ForecastError::DataError(format!("Missing date on row {}", row + 1))
                })?;
                NaiveDate::parse_from_str(raw.trim(), HISTORY_DATE_FORMAT).map_err(|e| {
                    ForecastError::DataError(format!(
                        "Unparseable date '{}' on row {} (expected DD-MM-YYYY): {}",
                        raw,
                        row + 1,
                        e
                    ))
                })
            })
            .collect()
    }

    /// Use the revenue column if present, otherwise price × units sold
    fn derive_revenue(df: &DataFrame) -> Result<Vec<f64>> {
        if let Some(revenue_col) = Self::find_column(df, &["sales", "revenue"]) {
            return column_as_f64(df, &revenue_col);
        }

        let price_col = Self::find_column(df, &["price"]).ok_or_else(|| {
            ForecastError::DataError(
                "Data needs a Sales/Revenue column or Price and Units_Sold columns".to_string(),
            )
        })?;
        let units_col = Self::find_column(df, &["units", "quantity", "qty"]).ok_or_else(|| {
            ForecastError::DataError(format!(
                "Found price column '{}' but no units sold column",
                price_col
            ))
        })?;

        debug!(price = %price_col, units = %units_col, "Deriving revenue from price and units");
        let prices = column_as_f64(df, &price_col)?;
        let units = column_as_f64(df, &units_col)?;

        Ok(prices.iter().zip(units.iter()).map(|(p, u)| p * u).collect())
    }
}

/// Read a numeric column as f64 values, failing on nulls or non-numeric data
fn column_as_f64(df: &DataFrame, column_name: &str) -> Result<Vec<f64>> {
    let col = df.column(column_name).map_err(|e| {
        ForecastError::DataError(format!("Column '{}' not found: {}", column_name, e))
    })?;

    if !col.dtype().is_numeric() {
        return Err(ForecastError::DataError(format!(
            "Column '{}' cannot be converted to f64",
            column_name
        )));
    }

    let cast = col.cast(&DataType::Float64)?;
    cast.f64()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| {
                ForecastError::DataError(format!(
                    "Missing value in column '{}' on row {}",
                    column_name,
                    row + 1
                ))
            })
        })
        .collect()
}

/// 1970-01-01, the origin of polars' Date physical representation
fn unix_epoch() -> NaiveDate {
    NaiveDate::default()
}

impl SalesHistory {
    /// Create a new SalesHistory from dates and daily revenue
    ///
    /// Dates must be strictly increasing and values finite.
    pub fn new(dates: Vec<NaiveDate>, revenue: Vec<f64>) -> Result<Self> {
        if dates.len() != revenue.len() {
            return Err(ForecastError::ValidationError(format!(
                "Dates length ({}) doesn't match revenue length ({})",
                dates.len(),
                revenue.len()
            )));
        }

        if let Some(pair) = dates.windows(2).find(|pair| pair[1] <= pair[0]) {
            return Err(ForecastError::DataError(format!(
                "Dates must be strictly increasing, found {} after {}",
                pair[1], pair[0]
            )));
        }

        if let Some(value) = revenue.iter().find(|v| !v.is_finite()) {
            return Err(ForecastError::DataError(format!(
                "Revenue values must be finite, found {}",
                value
            )));
        }

        let epoch = unix_epoch();
        let days: Vec<i32> = dates
            .iter()
            .map(|d| (*d - epoch).num_days() as i32)
            .collect();

        let date_series = Series::new(DATE_COLUMN, days).cast(&DataType::Date)?;
        let revenue_series = Series::new(REVENUE_COLUMN, revenue);
        let df = DataFrame::new(vec![date_series, revenue_series])?;

        Ok(Self { df })
    }

    /// Get the DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Get the daily revenue as a vector
    pub fn revenue(&self) -> Vec<f64> {
        match self.df.column(REVENUE_COLUMN).and_then(|col| col.f64()) {
            Ok(values) => values.into_iter().flatten().collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Get the dates as a vector
    pub fn dates(&self) -> Vec<NaiveDate> {
        let physical = match self
            .df
            .column(DATE_COLUMN)
            .and_then(|col| col.cast(&DataType::Int32))
        {
            Ok(series) => series,
            Err(_) => return Vec::new(),
        };

        let epoch = unix_epoch();
        match physical.i32() {
            Ok(days) => days
                .into_iter()
                .flatten()
                .map(|d| epoch + chrono::Duration::days(d as i64))
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Get (date, revenue) pairs in chronological order
    pub fn observations(&self) -> Vec<(NaiveDate, f64)> {
        self.dates().into_iter().zip(self.revenue()).collect()
    }

    /// Last observed date, if any
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates().last().copied()
    }

    /// Get a slice of the data from start to end index
    pub fn slice(&self, start: usize, end: Option<usize>) -> Result<Self> {
        let end = end.unwrap_or(self.df.height());
        if start > end || end > self.df.height() {
            return Err(ForecastError::ValidationError(format!(
                "Invalid slice {}..{} for history of length {}",
                start,
                end,
                self.df.height()
            )));
        }

        Ok(SalesHistory {
            df: self.df.slice(start as i64, end - start),
        })
    }

    /// Check if the history is empty
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Get the number of days in the history
    pub fn len(&self) -> usize {
        self.df.height()
    }

    /// Sum of daily revenue
    pub fn total_revenue(&self) -> f64 {
        self.revenue().iter().sum()
    }

    /// Calculate the mean daily revenue
    pub fn mean(&self) -> Result<f64> {
        let revenue = self.revenue();
        if revenue.is_empty() {
            return Err(ForecastError::DataError(
                "No revenue values available".to_string(),
            ));
        }

        Ok(revenue.iter().sum::<f64>() / revenue.len() as f64)
    }

    /// Calculate the standard deviation of daily revenue
    pub fn std_dev(&self) -> Result<f64> {
        let revenue = self.revenue();
        let mean = self.mean()?;
        let variance: f64 = revenue
            .iter()
            .map(|value| (value - mean).powi(2))
            .sum::<f64>()
            / revenue.len() as f64;

        Ok(variance.sqrt())
    }
}
