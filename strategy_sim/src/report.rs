//! Downloadable CSV report of a forecast window

use crate::currency::Currency;
use crate::error::{Result, SimulationError};
use crate::trend::cumulative_revenue;
use chrono::NaiveDate;
use sales_forecast::ForecastWindow;
use std::io::{Read, Write};

/// Suggested file name for the exported report
pub const REPORT_FILE_NAME: &str = "forecast_report.csv";

/// One forecast day as it appears in the report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub date: NaiveDate,
    pub predicted: f64,
    pub min_estimate: f64,
    pub max_estimate: f64,
    pub cumulative_total: f64,
}

/// Report rows for an already-normalized window
pub fn report_rows(window: &ForecastWindow) -> Vec<ReportRow> {
    window
        .iter()
        .zip(cumulative_revenue(window))
        .map(|(point, cumulative_total)| ReportRow {
            date: point.date(),
            predicted: point.estimate(),
            min_estimate: point.lower_bound(),
            max_estimate: point.upper_bound(),
            cumulative_total,
        })
        .collect()
}

pub fn report_header(currency: Currency) -> [String; 5] {
    [
        "Date".to_string(),
        format!("Predicted ({})", currency.symbol()),
        "Min Estimate".to_string(),
        "Max Estimate".to_string(),
        "Cumulative Total".to_string(),
    ]
}

/// Write rows as CSV; dates are ISO formatted, amounts have two decimals
pub fn write_report<W: Write>(writer: W, rows: &[ReportRow], currency: Currency) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(report_header(currency))?;

    for row in rows {
        csv_writer.write_record([
            row.date.format("%Y-%m-%d").to_string(),
            format!("{:.2}", row.predicted),
            format!("{:.2}", row.min_estimate),
            format!("{:.2}", row.max_estimate),
            format!("{:.2}", row.cumulative_total),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Encode a normalized window as report bytes
pub fn export_report(window: &ForecastWindow, currency: Currency) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_report(&mut buffer, &report_rows(window), currency)?;
    Ok(buffer)
}

/// Read a report produced by `write_report`
pub fn parse_report<R: Read>(reader: R) -> Result<Vec<ReportRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?;
    if headers.len() != 5 || headers.get(0) != Some("Date") {
        return Err(SimulationError::Report(format!(
            "Unexpected report header: {:?}",
            headers
        )));
    }

    csv_reader
        .deserialize::<(NaiveDate, f64, f64, f64, f64)>()
        .map(|record| -> Result<ReportRow> {
            let (date, predicted, min_estimate, max_estimate, cumulative_total) = record?;
            Ok(ReportRow {
                date,
                predicted,
                min_estimate,
                max_estimate,
                cumulative_total,
            })
        })
        .collect()
}
