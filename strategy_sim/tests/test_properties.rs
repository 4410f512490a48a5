use approx::assert_relative_eq;
use chrono::NaiveDate;
use proptest::prelude::*;
use sales_forecast::{ForecastPoint, ForecastWindow};
use strategy_sim::currency::Currency;
use strategy_sim::report::{export_report, parse_report};
use strategy_sim::scenario::{simulate, Scenario, DEFAULT_BASE_MARGIN};
use strategy_sim::trend::{cumulative_revenue, TrendSummary};

fn window_from(estimates: &[(f64, f64, f64)]) -> ForecastWindow {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let points = estimates
        .iter()
        .enumerate()
        .map(|(i, &(estimate, below, above))| {
            let date = start + chrono::Duration::days(i as i64);
            ForecastPoint::new(date, estimate, estimate - below, estimate + above).unwrap()
        })
        .collect();
    ForecastWindow::new(points).unwrap()
}

fn estimates_strategy() -> impl Strategy<Value = Vec<(f64, f64, f64)>> {
    prop::collection::vec((0.0f64..50_000.0, 0.0f64..5_000.0, 0.0f64..5_000.0), 1..120)
}

proptest! {
    #[test]
    fn prop_cumulative_is_non_decreasing(estimates in estimates_strategy()) {
        let window = window_from(&estimates);
        let cumulative = cumulative_revenue(&window);

        prop_assert_eq!(cumulative.len(), window.len());
        prop_assert!(cumulative.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn prop_classification_partitions_growth(growth in -1_000.0f64..1_000.0) {
        let scenario = Scenario::classify(growth);
        let expected = if growth < -5.0 {
            Scenario::DefensiveRetention
        } else if growth > 5.0 {
            Scenario::AggressiveExpansion
        } else {
            Scenario::Optimization
        };
        prop_assert_eq!(scenario, expected);
    }

    #[test]
    fn prop_baseline_profit_is_thirty_percent(
        total in 0.0f64..10_000_000.0,
        growth in -100.0f64..100.0,
    ) {
        let result = simulate(total, growth, DEFAULT_BASE_MARGIN);
        prop_assert!((result.baseline_profit - total * 0.30).abs() <= 1e-9 * total.max(1.0));
        prop_assert_eq!(result.baseline_revenue, total);
    }

    #[test]
    fn prop_normalization_commutes_with_summation(estimates in estimates_strategy()) {
        let window = window_from(&estimates);
        for currency in Currency::ALL {
            let normalized_then_summed: f64 = currency
                .normalize_window(&window)
                .unwrap()
                .iter()
                .map(|p| p.estimate())
                .sum();
            let summed_then_normalized = currency.convert(window.iter().map(|p| p.estimate()).sum());

            let tolerance = 1e-9 * summed_then_normalized.abs().max(1.0);
            prop_assert!((normalized_then_summed - summed_then_normalized).abs() <= tolerance);
        }
    }

    #[test]
    fn prop_report_round_trip(estimates in estimates_strategy()) {
        let window = window_from(&estimates);
        let cumulative = cumulative_revenue(&window);
        let bytes = export_report(&window, Currency::Usd).unwrap();
        let rows = parse_report(bytes.as_slice()).unwrap();

        prop_assert_eq!(rows.len(), window.len());
        for ((row, point), total) in rows.iter().zip(window.iter()).zip(cumulative) {
            prop_assert_eq!(row.date, point.date());
            prop_assert!((row.predicted - point.estimate()).abs() <= 0.005 + 1e-9);
            prop_assert!((row.min_estimate - point.lower_bound()).abs() <= 0.005 + 1e-9);
            prop_assert!((row.max_estimate - point.upper_bound()).abs() <= 0.005 + 1e-9);
            prop_assert!((row.cumulative_total - total).abs() <= 0.005 + 1e-6);
        }
    }
}

#[test]
fn test_boundaries_map_to_optimization() {
    assert_eq!(Scenario::classify(-5.0), Scenario::Optimization);
    assert_eq!(Scenario::classify(5.0), Scenario::Optimization);
}

#[test]
fn test_zero_first_estimate_resolves_to_flat_growth() {
    let window = window_from(&[(0.0, 0.0, 10.0), (100.0, 5.0, 5.0), (200.0, 5.0, 5.0)]);
    let summary = TrendSummary::from_window(&window);

    assert_eq!(summary.growth_pct, 0.0);
    assert_eq!(Scenario::classify(summary.growth_pct), Scenario::Optimization);
}

#[test]
fn test_worked_examples() {
    let defensive = simulate(1000.0, -10.0, DEFAULT_BASE_MARGIN);
    assert_eq!(defensive.scenario, Scenario::DefensiveRetention);
    assert_relative_eq!(defensive.simulated_revenue, 1125.0, epsilon = 1e-9);
    assert_relative_eq!(defensive.simulated_profit, 225.0, epsilon = 1e-9);

    let expansion = simulate(1000.0, 10.0, DEFAULT_BASE_MARGIN);
    assert_eq!(expansion.scenario, Scenario::AggressiveExpansion);
    assert_relative_eq!(expansion.simulated_revenue, 1200.0, epsilon = 1e-9);
    assert_relative_eq!(expansion.simulated_profit, 310.0, epsilon = 1e-9);

    let optimization = simulate(1000.0, 0.0, DEFAULT_BASE_MARGIN);
    assert_eq!(optimization.scenario, Scenario::Optimization);
    assert_relative_eq!(optimization.simulated_revenue, 1100.0, epsilon = 1e-9);
    assert_relative_eq!(optimization.simulated_profit, 330.0, epsilon = 1e-9);
}
