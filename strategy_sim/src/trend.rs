//! Summary statistics over a forecast window

use sales_forecast::{ForecastPoint, ForecastWindow};
use serde::Serialize;

/// Aggregate view of a currency-normalized forecast window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSummary {
    /// Sum of all point estimates
    pub total: f64,
    /// Mean daily estimate
    pub average: f64,
    /// Percent change from the first to the last estimate
    pub growth_pct: f64,
    pub first_estimate: f64,
    pub last_estimate: f64,
    /// Highest estimate; the earliest one on ties
    pub best_point: ForecastPoint,
    /// Running total of estimates, one entry per point
    pub cumulative_revenue: Vec<f64>,
}

impl TrendSummary {
    pub fn from_window(window: &ForecastWindow) -> Self {
        let cumulative_revenue = cumulative_revenue(window);
        let total = cumulative_revenue.last().copied().unwrap_or(0.0);
        let first_estimate = window.first().estimate();
        let last_estimate = window.last().estimate();

        Self {
            total,
            average: total / window.len() as f64,
            growth_pct: growth_pct(first_estimate, last_estimate),
            first_estimate,
            last_estimate,
            best_point: best_point(window),
            cumulative_revenue,
        }
    }
}

/// Percent growth from `first` to `last`
///
/// A zero starting value has no defined growth and is reported as flat (0%).
pub fn growth_pct(first: f64, last: f64) -> f64 {
    if first == 0.0 {
        return 0.0;
    }
    (last - first) / first * 100.0
}

/// Running sum of estimates in window order
pub fn cumulative_revenue(window: &ForecastWindow) -> Vec<f64> {
    window
        .iter()
        .scan(0.0, |running, point| {
            *running += point.estimate();
            Some(*running)
        })
        .collect()
}

fn best_point(window: &ForecastWindow) -> ForecastPoint {
    let mut best = window.first();
    for point in window.iter().skip(1) {
        if point.estimate() > best.estimate() {
            best = point;
        }
    }
    *best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn window(estimates: &[f64]) -> ForecastWindow {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let points = estimates
            .iter()
            .enumerate()
            .map(|(i, &e)| {
                let date = start + chrono::Duration::days(i as i64);
                ForecastPoint::new(date, e, e - 5.0, e + 5.0).unwrap()
            })
            .collect();
        ForecastWindow::new(points).unwrap()
    }

    #[test]
    fn test_summary_statistics() {
        let summary = TrendSummary::from_window(&window(&[100.0, 120.0, 90.0, 110.0]));

        assert_relative_eq!(summary.total, 420.0);
        assert_relative_eq!(summary.average, 105.0);
        assert_relative_eq!(summary.growth_pct, 10.0);
        assert_eq!(summary.cumulative_revenue, vec![100.0, 220.0, 310.0, 420.0]);
        assert_eq!(summary.best_point.estimate(), 120.0);
    }

    #[test]
    fn test_zero_first_estimate_is_flat() {
        let summary = TrendSummary::from_window(&window(&[0.0, 50.0, 80.0]));

        assert_eq!(summary.growth_pct, 0.0);
        assert!(summary.growth_pct.is_finite());
    }

    #[test]
    fn test_best_point_ties_resolve_to_earliest() {
        let w = window(&[10.0, 30.0, 20.0, 30.0]);
        let summary = TrendSummary::from_window(&w);

        assert_eq!(summary.best_point.date(), w.points()[1].date());
    }

    #[test]
    fn test_single_point_window() {
        let summary = TrendSummary::from_window(&window(&[42.0]));

        assert_eq!(summary.total, 42.0);
        assert_eq!(summary.average, 42.0);
        assert_eq!(summary.growth_pct, 0.0);
    }

    #[test]
    fn test_declining_growth() {
        assert_relative_eq!(growth_pct(200.0, 150.0), -25.0);
    }
}
