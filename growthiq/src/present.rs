//! Plain-text rendering of training and forecast results

use sales_forecast::metrics::ForecastAccuracy;
use sales_forecast::{ModelArtifact, TrainedForecastModel};
use std::fmt::Write;
use std::path::Path;
use strategy_sim::weekday::best_weekday;
use strategy_sim::{Currency, DashboardReport, SimulationResult};

pub fn training_summary(
    artifact: &ModelArtifact,
    accuracy: Option<&ForecastAccuracy>,
    path: &Path,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Trained {} on {} days of sales history",
        artifact.model.name(),
        artifact.history_days
    );
    match accuracy {
        Some(accuracy) => {
            let _ = write!(out, "{}", accuracy);
        }
        None => {
            let _ = writeln!(out, "Hold-out accuracy unavailable (history too short)");
        }
    }
    let _ = writeln!(out, "Model saved to {}", path.display());
    out
}

fn signed_pct(value: f64) -> String {
    format!("{:+.1}%", value)
}

fn signed_amount(currency: Currency, amount: f64) -> String {
    if amount.round() > 0.0 {
        format!("+{}", currency.format_amount(amount))
    } else {
        currency.format_amount(amount)
    }
}

/// Before/after figures with revenue lift, profit impact and margin change
pub fn simulation_table(sim: &SimulationResult, currency: Currency) -> String {
    let mut out = String::new();
    let row = |out: &mut String, label: &str, before: String, after: String, change: String| {
        let _ = writeln!(out, "  {:<14}{:>16}{:>16}{:>12}", label, before, after, change);
    };

    row(
        &mut out,
        "",
        "Current path".to_string(),
        "Simulated".to_string(),
        "Change".to_string(),
    );
    row(
        &mut out,
        "Revenue",
        currency.format_amount(sim.baseline_revenue),
        currency.format_amount(sim.simulated_revenue),
        signed_amount(currency, sim.revenue_lift()),
    );
    row(
        &mut out,
        "Profit",
        currency.format_amount(sim.baseline_profit),
        currency.format_amount(sim.simulated_profit),
        signed_amount(currency, sim.profit_impact()),
    );
    row(
        &mut out,
        "Profit margin",
        format!("{:.1}%", sim.baseline_margin() * 100.0),
        format!("{:.1}%", sim.simulated_margin() * 100.0),
        format!("{:+.1} pts", sim.margin_impact() * 100.0),
    );
    out
}

pub fn dashboard_summary(report: &DashboardReport) -> String {
    let currency: Currency = report.currency;
    let summary = &report.summary;
    let sim = &report.simulation;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Forecast: {} days from {} to {} ({}, {})",
        report.window.len(),
        report.window.first().date(),
        report.window.last().date(),
        report.model_name,
        currency
    );
    let _ = writeln!(out, "  Total revenue:  {}", currency.format_amount(summary.total));
    let _ = writeln!(out, "  Daily average:  {}", currency.format_amount(summary.average));
    let _ = writeln!(out, "  Growth:         {}", signed_pct(summary.growth_pct));
    let _ = writeln!(
        out,
        "  Best day:       {} ({})",
        summary.best_point.date(),
        currency.format_amount(summary.best_point.estimate())
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Scenario: {}", sim.scenario.headline());
    let _ = writeln!(out, "  {}", sim.message);
    let _ = writeln!(out, "  Recommendation: {}", report.recommendation);
    out.push_str(&simulation_table(sim, currency));

    let _ = writeln!(out);
    let _ = writeln!(out, "Weekday profile:");
    for day in &report.weekdays {
        let _ = writeln!(
            out,
            "  {}  {:>12}  ({} days)",
            day.weekday,
            currency.format_amount(day.average),
            day.days
        );
    }
    if let Some(best) = best_weekday(&report.weekdays) {
        let _ = writeln!(out, "  Strongest day: {}", best.weekday);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use strategy_sim::scenario::{simulate, DEFAULT_BASE_MARGIN};

    #[test]
    fn test_signed_amount() {
        assert_eq!(signed_amount(Currency::Usd, 1250.0), "+$1,250");
        assert_eq!(signed_amount(Currency::Usd, -75.0), "-$75");
        assert_eq!(signed_amount(Currency::Inr, 0.2), "₹0");
    }

    #[test]
    fn test_simulation_table_shows_lift_impact_and_margin() {
        // 1200 revenue, 310 profit against 1000 / 300
        let sim = simulate(1000.0, 10.0, DEFAULT_BASE_MARGIN);
        let table = simulation_table(&sim, Currency::Usd);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("  Revenue"));
        assert!(lines[1].ends_with("+$200"));
        assert!(lines[2].ends_with("+$10"));
        assert!(lines[3].contains("30.0%"));
        assert!(lines[3].contains("25.8%"));
        assert!(lines[3].ends_with("-4.2 pts"));
    }
}
