//! Scenario classification and what-if simulation
//!
//! A forecast's growth rate selects exactly one [`Scenario`]. Each scenario
//! carries its own intervention and financial model; [`simulate`] returns the
//! baseline ("current path") next to the outcome after the intervention.

use crate::error::{Result, SimulationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Profit as a fraction of revenue on the current path
pub const DEFAULT_BASE_MARGIN: f64 = 0.30;

/// Business scenario selected from the forecast growth rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scenario {
    /// Revenue is dipping: trade margin for volume with a discount
    DefensiveRetention,
    /// Revenue is rising: buy more volume with advertising
    AggressiveExpansion,
    /// Revenue is flat: raise order value with bundles
    Optimization,
}

impl Scenario {
    /// Classify with the default thresholds (below -5% / above +5%)
    pub fn classify(growth_pct: f64) -> Self {
        SimulationAssumptions::default().classify(growth_pct)
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Scenario::DefensiveRetention => "DEFENSIVE RETENTION",
            Scenario::AggressiveExpansion => "AGGRESSIVE EXPANSION",
            Scenario::Optimization => "OPTIMIZATION",
        }
    }

    /// Fixed explanation of the simulated outcome
    pub fn message(&self) -> &'static str {
        match self {
            Scenario::DefensiveRetention => {
                "Offering a discount coupon sacrifices margin but gains volume, \
                 which recovers the revenue trajectory."
            }
            Scenario::AggressiveExpansion => {
                "Extra ad spend costs money upfront but maximizes total profit \
                 through higher volume."
            }
            Scenario::Optimization => {
                "Bundling raises average order value without lowering prices."
            }
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Scenario::DefensiveRetention => "DEFENSIVE_RETENTION",
            Scenario::AggressiveExpansion => "AGGRESSIVE_EXPANSION",
            Scenario::Optimization => "OPTIMIZATION",
        };
        f.write_str(tag)
    }
}

/// Business heuristics behind the simulation
///
/// `Default` holds the standard heuristics; a dashboard config may override
/// any of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationAssumptions {
    /// Growth below this percentage is a decline
    pub decline_threshold_pct: f64,
    /// Growth above this percentage is an expansion
    pub growth_threshold_pct: f64,
    /// Price cut offered in a decline
    pub discount_rate: f64,
    /// Unit-volume increase the discount is expected to drive
    pub discount_volume_uplift: f64,
    /// Margin given up by discounting, as a fraction of revenue
    pub discount_margin_erosion: f64,
    /// Ad budget as a fraction of baseline revenue
    pub ad_spend_ratio: f64,
    /// Volume increase the ad spend is expected to drive
    pub ad_volume_uplift: f64,
    /// Order value increase from bundling
    pub bundle_order_uplift: f64,
}

impl Default for SimulationAssumptions {
    fn default() -> Self {
        Self {
            decline_threshold_pct: -5.0,
            growth_threshold_pct: 5.0,
            discount_rate: 0.10,
            discount_volume_uplift: 0.25,
            discount_margin_erosion: 0.10,
            ad_spend_ratio: 0.05,
            ad_volume_uplift: 0.20,
            bundle_order_uplift: 0.10,
        }
    }
}

impl SimulationAssumptions {
    /// Thresholds are exclusive: values equal to either threshold are flat
    pub fn classify(&self, growth_pct: f64) -> Scenario {
        if growth_pct < self.decline_threshold_pct {
            Scenario::DefensiveRetention
        } else if growth_pct > self.growth_threshold_pct {
            Scenario::AggressiveExpansion
        } else {
            Scenario::Optimization
        }
    }

    /// Recommended action for a scenario under these assumptions
    pub fn recommendation(&self, scenario: Scenario) -> String {
        match scenario {
            Scenario::DefensiveRetention => format!(
                "Launch a {:.0}% discount campaign to recover lost traffic.",
                self.discount_rate * 100.0
            ),
            Scenario::AggressiveExpansion => format!(
                "Put {:.0}% of revenue into advertising to fuel the rising trend.",
                self.ad_spend_ratio * 100.0
            ),
            Scenario::Optimization => {
                "Create product bundles to increase order value.".to_string()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.decline_threshold_pct <= self.growth_threshold_pct) {
            return Err(SimulationError::Config(format!(
                "decline_threshold_pct ({}) must not exceed growth_threshold_pct ({})",
                self.decline_threshold_pct, self.growth_threshold_pct
            )));
        }

        let ratios = [
            ("discount_rate", self.discount_rate),
            ("discount_volume_uplift", self.discount_volume_uplift),
            ("discount_margin_erosion", self.discount_margin_erosion),
            ("ad_spend_ratio", self.ad_spend_ratio),
            ("ad_volume_uplift", self.ad_volume_uplift),
            ("bundle_order_uplift", self.bundle_order_uplift),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimulationError::Config(format!(
                    "{} must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Before-and-after figures for one scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub scenario: Scenario,
    pub message: String,
    pub baseline_revenue: f64,
    pub baseline_profit: f64,
    pub simulated_revenue: f64,
    pub simulated_profit: f64,
}

impl SimulationResult {
    pub fn revenue_lift(&self) -> f64 {
        self.simulated_revenue - self.baseline_revenue
    }

    pub fn profit_impact(&self) -> f64 {
        self.simulated_profit - self.baseline_profit
    }

    /// Simulated profit over simulated revenue, 0 for zero revenue
    pub fn simulated_margin(&self) -> f64 {
        if self.simulated_revenue == 0.0 {
            return 0.0;
        }
        self.simulated_profit / self.simulated_revenue
    }

    /// Profit over revenue on the current path, 0 for zero revenue
    pub fn baseline_margin(&self) -> f64 {
        if self.baseline_revenue == 0.0 {
            return 0.0;
        }
        self.baseline_profit / self.baseline_revenue
    }

    /// Change in profit margin as a fraction (0.05 = five points)
    pub fn margin_impact(&self) -> f64 {
        self.simulated_margin() - self.baseline_margin()
    }
}

/// Simulate the recommended strategy with the default heuristics
pub fn simulate(total_revenue: f64, growth_pct: f64, base_margin: f64) -> SimulationResult {
    simulate_with(
        &SimulationAssumptions::default(),
        total_revenue,
        growth_pct,
        base_margin,
    )
}

/// Simulate the recommended strategy with explicit heuristics
pub fn simulate_with(
    assumptions: &SimulationAssumptions,
    total_revenue: f64,
    growth_pct: f64,
    base_margin: f64,
) -> SimulationResult {
    let scenario = assumptions.classify(growth_pct);

    let (simulated_revenue, simulated_profit) = match scenario {
        Scenario::DefensiveRetention => {
            let revenue = total_revenue
                * (1.0 - assumptions.discount_rate)
                * (1.0 + assumptions.discount_volume_uplift);
            (
                revenue,
                revenue * (base_margin - assumptions.discount_margin_erosion),
            )
        }
        Scenario::AggressiveExpansion => {
            let revenue = total_revenue * (1.0 + assumptions.ad_volume_uplift);
            let ad_spend = total_revenue * assumptions.ad_spend_ratio;
            (revenue, revenue * base_margin - ad_spend)
        }
        Scenario::Optimization => {
            let revenue = total_revenue * (1.0 + assumptions.bundle_order_uplift);
            (revenue, revenue * base_margin)
        }
    };

    SimulationResult {
        scenario,
        message: scenario.message().to_string(),
        baseline_revenue: total_revenue,
        baseline_profit: total_revenue * base_margin,
        simulated_revenue,
        simulated_profit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(-10.0, Scenario::DefensiveRetention)]
    #[case(-5.0001, Scenario::DefensiveRetention)]
    #[case(-5.0, Scenario::Optimization)]
    #[case(0.0, Scenario::Optimization)]
    #[case(5.0, Scenario::Optimization)]
    #[case(5.0001, Scenario::AggressiveExpansion)]
    #[case(250.0, Scenario::AggressiveExpansion)]
    fn test_classification_boundaries(#[case] growth: f64, #[case] expected: Scenario) {
        assert_eq!(Scenario::classify(growth), expected);
    }

    #[test]
    fn test_defensive_retention_example() {
        let result = simulate(1000.0, -10.0, DEFAULT_BASE_MARGIN);

        assert_eq!(result.scenario, Scenario::DefensiveRetention);
        assert_relative_eq!(result.simulated_revenue, 1125.0, epsilon = 1e-9);
        assert_relative_eq!(result.simulated_profit, 225.0, epsilon = 1e-9);
        assert_relative_eq!(result.baseline_profit, 300.0, epsilon = 1e-9);
    }

    #[test]
    fn test_aggressive_expansion_example() {
        let result = simulate(1000.0, 10.0, DEFAULT_BASE_MARGIN);

        assert_eq!(result.scenario, Scenario::AggressiveExpansion);
        assert_relative_eq!(result.simulated_revenue, 1200.0, epsilon = 1e-9);
        assert_relative_eq!(result.simulated_profit, 310.0, epsilon = 1e-9);
    }

    #[test]
    fn test_optimization_example() {
        let result = simulate(1000.0, 0.0, DEFAULT_BASE_MARGIN);

        assert_eq!(result.scenario, Scenario::Optimization);
        assert_relative_eq!(result.simulated_revenue, 1100.0, epsilon = 1e-9);
        assert_relative_eq!(result.simulated_profit, 330.0, epsilon = 1e-9);
        assert_relative_eq!(result.simulated_margin(), 0.30, epsilon = 1e-12);
    }

    #[test]
    fn test_result_carries_message_and_deltas() {
        let result = simulate(1000.0, -10.0, DEFAULT_BASE_MARGIN);

        assert_eq!(result.message, Scenario::DefensiveRetention.message());
        assert_relative_eq!(result.revenue_lift(), 125.0, epsilon = 1e-9);
        assert_relative_eq!(result.profit_impact(), -75.0, epsilon = 1e-9);
        assert_relative_eq!(result.simulated_margin(), 0.20, epsilon = 1e-12);
        assert_relative_eq!(result.baseline_margin(), 0.30, epsilon = 1e-12);
        assert_relative_eq!(result.margin_impact(), -0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_custom_assumptions() {
        let assumptions = SimulationAssumptions {
            growth_threshold_pct: 20.0,
            bundle_order_uplift: 0.05,
            ..SimulationAssumptions::default()
        };
        let result = simulate_with(&assumptions, 1000.0, 10.0, DEFAULT_BASE_MARGIN);

        assert_eq!(result.scenario, Scenario::Optimization);
        assert_relative_eq!(result.simulated_revenue, 1050.0, epsilon = 1e-9);
    }

    #[test]
    fn test_validate_rejects_bad_assumptions() {
        let inverted = SimulationAssumptions {
            decline_threshold_pct: 10.0,
            ..SimulationAssumptions::default()
        };
        assert!(inverted.validate().is_err());

        let negative = SimulationAssumptions {
            ad_spend_ratio: -0.1,
            ..SimulationAssumptions::default()
        };
        assert!(negative.validate().is_err());

        assert!(SimulationAssumptions::default().validate().is_ok());
    }

    #[test]
    fn test_recommendation_text() {
        let assumptions = SimulationAssumptions::default();
        assert!(assumptions
            .recommendation(Scenario::DefensiveRetention)
            .contains("10% discount"));
        // the advertising advice quotes the same ratio the simulation charges
        assert!(assumptions
            .recommendation(Scenario::AggressiveExpansion)
            .contains("5% of revenue"));
        let heavier = SimulationAssumptions {
            ad_spend_ratio: 0.15,
            ..SimulationAssumptions::default()
        };
        assert!(heavier
            .recommendation(Scenario::AggressiveExpansion)
            .contains("15% of revenue"));
        assert_eq!(Scenario::AggressiveExpansion.to_string(), "AGGRESSIVE_EXPANSION");
    }
}
