use crate::currency::Currency;
use crate::error::{Result, SimulationError};
use crate::scenario::{SimulationAssumptions, DEFAULT_BASE_MARGIN};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Dashboard settings (TOML). Every field is optional.
///
/// Example `growthiq.toml`:
/// ```toml
/// model_path = "models/forecast_model.json"
/// currency = "INR"
/// default_horizon_days = 45
/// base_margin = 0.35
///
/// [assumptions]
/// discount_rate = 0.15
/// discount_volume_uplift = 0.30
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Trained model artifact
    pub model_path: PathBuf,
    /// Currency used when the request does not name one
    pub currency: Currency,
    pub default_horizon_days: usize,
    pub min_horizon_days: usize,
    pub max_horizon_days: usize,
    /// Profit as a fraction of revenue on the current path
    pub base_margin: f64,
    pub assumptions: SimulationAssumptions,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("forecast_model.json"),
            currency: Currency::default(),
            default_horizon_days: 30,
            min_horizon_days: 15,
            max_horizon_days: 120,
            base_margin: DEFAULT_BASE_MARGIN,
            assumptions: SimulationAssumptions::default(),
        }
    }
}

impl DashboardConfig {
    /// Environment variable naming a config file
    pub const ENV_VAR: &'static str = "GROWTHIQ_CONFIG";

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DashboardConfig = toml::from_str(content)
            .map_err(|e| SimulationError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SimulationError::Config(format!(
                "Failed to read config at '{}': {e}",
                path.display()
            ))
        })?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "Loaded dashboard config");
        Ok(config)
    }

    /// Explicit path first, then `GROWTHIQ_CONFIG`, then defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match std::env::var(Self::ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_horizon_days == 0 || self.min_horizon_days > self.max_horizon_days {
            return Err(SimulationError::Config(format!(
                "Horizon bounds {}..={} are invalid",
                self.min_horizon_days, self.max_horizon_days
            )));
        }
        if !(self.min_horizon_days..=self.max_horizon_days).contains(&self.default_horizon_days) {
            return Err(SimulationError::Config(format!(
                "default_horizon_days {} is outside {}..={}",
                self.default_horizon_days, self.min_horizon_days, self.max_horizon_days
            )));
        }
        if !(0.0..=1.0).contains(&self.base_margin) {
            return Err(SimulationError::Config(format!(
                "base_margin must be between 0 and 1, got {}",
                self.base_margin
            )));
        }
        self.assumptions.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(
            DashboardConfig::from_toml_str("").unwrap(),
            DashboardConfig::default()
        );
    }

    #[test]
    fn test_partial_override() {
        let config = DashboardConfig::from_toml_str(
            r#"
            currency = "INR"
            default_horizon_days = 60

            [assumptions]
            discount_rate = 0.15
            "#,
        )
        .unwrap();

        assert_eq!(config.currency, Currency::Inr);
        assert_eq!(config.default_horizon_days, 60);
        assert_eq!(config.assumptions.discount_rate, 0.15);
        assert_eq!(config.assumptions.discount_volume_uplift, 0.25);
        assert_eq!(config.base_margin, 0.30);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(DashboardConfig::from_toml_str("default_horizon_days = 200").is_err());
        assert!(DashboardConfig::from_toml_str("base_margin = 1.5").is_err());
        assert!(DashboardConfig::from_toml_str("currency = \"EUR\"").is_err());
        assert!(DashboardConfig::from_toml_str("min_horizon_days = 0").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = DashboardConfig::load("/nonexistent/growthiq.toml");
        assert!(matches!(result, Err(SimulationError::Config(_))));
    }
}
