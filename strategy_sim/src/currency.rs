//! Display currency selection and normalization

use crate::error::{Result, SimulationError};
use sales_forecast::{ForecastPoint, ForecastWindow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currencies the dashboard can display; amounts are stored in USD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Inr,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::Usd, Currency::Inr];

    /// Units of this currency per USD
    pub fn rate(self) -> f64 {
        match self {
            Currency::Usd => 1.0,
            Currency::Inr => 84.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Inr => "₹",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Inr => "INR",
        }
    }

    /// Convert a USD amount into this currency
    pub fn convert(self, amount: f64) -> f64 {
        amount * self.rate()
    }

    /// Fails only if a converted amount overflows
    pub fn normalize_point(self, point: &ForecastPoint) -> Result<ForecastPoint> {
        Ok(point.scaled(self.rate())?)
    }

    /// Convert estimate and both bounds of every point
    pub fn normalize_window(self, window: &ForecastWindow) -> Result<ForecastWindow> {
        Ok(window.scaled(self.rate())?)
    }

    /// Whole-unit amount with thousands separators, e.g. `$12,345`
    pub fn format_amount(self, amount: f64) -> String {
        let rounded = amount.round();
        let sign = if rounded < 0.0 { "-" } else { "" };
        let digits = format!("{:.0}", rounded.abs());

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        format!("{}{}{}", sign, self.symbol(), grouped)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.symbol())
    }
}

impl FromStr for Currency {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "usd" | "$" | "usd ($)" => Ok(Currency::Usd),
            "inr" | "₹" | "inr (₹)" => Ok(Currency::Inr),
            other => Err(SimulationError::InvalidRequest(format!(
                "Unknown currency '{}', expected USD or INR",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    #[rstest]
    #[case("usd", Currency::Usd)]
    #[case("USD", Currency::Usd)]
    #[case("$", Currency::Usd)]
    #[case("INR (₹)", Currency::Inr)]
    #[case(" inr ", Currency::Inr)]
    fn test_parse(#[case] input: &str, #[case] expected: Currency) {
        assert_eq!(input.parse::<Currency>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(
            "eur".parse::<Currency>(),
            Err(SimulationError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_default_is_base_unit() {
        assert_eq!(Currency::default(), Currency::Usd);
        assert_eq!(Currency::default().rate(), 1.0);
    }

    #[test]
    fn test_normalize_point_scales_all_amounts() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let point = ForecastPoint::new(date, 10.0, 8.0, 12.0).unwrap();
        let inr = Currency::Inr.normalize_point(&point).unwrap();

        assert_eq!(inr.date(), date);
        assert_eq!(inr.estimate(), 840.0);
        assert_eq!(inr.lower_bound(), 672.0);
        assert_eq!(inr.upper_bound(), 1008.0);

        let huge = ForecastPoint::new(date, f64::MAX / 2.0, 0.0, f64::MAX / 2.0).unwrap();
        assert!(Currency::Usd.normalize_point(&huge).is_ok());
        assert!(matches!(
            Currency::Inr.normalize_point(&huge),
            Err(SimulationError::Forecast(_))
        ));
    }

    #[rstest]
    #[case(Currency::Usd, 0.0, "$0")]
    #[case(Currency::Usd, 999.4, "$999")]
    #[case(Currency::Usd, 1234567.0, "$1,234,567")]
    #[case(Currency::Inr, 100000.0, "₹100,000")]
    #[case(Currency::Usd, -2500.0, "-$2,500")]
    fn test_format_amount(#[case] currency: Currency, #[case] amount: f64, #[case] expected: &str) {
        assert_eq!(currency.format_amount(amount), expected);
    }

    #[test]
    fn test_display() {
        assert_eq!(Currency::Inr.to_string(), "INR (₹)");
    }
}
