//! Engine configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_QUOTE_CURRENCY;
use crate::errors::{Error, Result};

/// Tunables shared by every computation pass.
///
/// Callers build one config per process (the CLI reads it from the
/// environment) and hand it to [`crate::portfolio::PortfolioService`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Fiat currency appended to bare crypto symbols.
    pub default_quote_currency: String,
    /// Days per year used to turn elapsed days into years for interest accrual.
    pub elapsed_days_per_year: Decimal,
    /// Days per year used for the daily accrual (fixed-income day gain).
    pub accrual_days_per_year: Decimal,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_quote_currency: DEFAULT_QUOTE_CURRENCY.to_string(),
            elapsed_days_per_year: dec!(365.25),
            accrual_days_per_year: dec!(365),
        }
    }
}

impl EngineConfig {
    pub fn with_default_quote_currency(mut self, currency: &str) -> Self {
        self.default_quote_currency = currency.trim().to_uppercase();
        self
    }

    pub fn validate(&self) -> Result<()> {
        let currency = self.default_quote_currency.trim();
        if currency.is_empty() || !currency.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::InvalidConfigValue(format!(
                "default quote currency '{}' must be a non-empty alphanumeric code",
                self.default_quote_currency
            )));
        }
        if self.elapsed_days_per_year <= Decimal::ZERO {
            return Err(Error::InvalidConfigValue(format!(
                "elapsed days per year must be positive, got {}",
                self.elapsed_days_per_year
            )));
        }
        if self.accrual_days_per_year <= Decimal::ZERO {
            return Err(Error::InvalidConfigValue(format!(
                "accrual days per year must be positive, got {}",
                self.accrual_days_per_year
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_quote_currency, "USD");
        assert_eq!(config.elapsed_days_per_year, dec!(365.25));
    }

    #[test]
    fn rejects_blank_quote_currency() {
        let config = EngineConfig::default().with_default_quote_currency("  ");
        assert!(matches!(config.validate(), Err(Error::InvalidConfigValue(_))));
    }

    #[test]
    fn rejects_non_positive_day_count() {
        let config = EngineConfig {
            accrual_days_per_year: Decimal::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn deserializes_partial_config_with_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"defaultQuoteCurrency":"EUR"}"#).unwrap();
        assert_eq!(config.default_quote_currency, "EUR");
        assert_eq!(config.accrual_days_per_year, dec!(365));
    }
}
