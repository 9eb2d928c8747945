use anyhow::{bail, Context};
use chrono::NaiveDate;
use finvault_core::constants::DEFAULT_QUOTE_CURRENCY;
use finvault_core::EngineConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub quote_currency: String,
    pub as_of: Option<NaiveDate>,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let quote_currency = lookup("FV_QUOTE_CURRENCY")
            .map(|v| v.trim().to_uppercase())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_QUOTE_CURRENCY.to_string());

        let as_of = match lookup("FV_AS_OF_DATE").filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .with_context(|| format!("Invalid FV_AS_OF_DATE '{}'", raw))?,
            ),
            None => None,
        };

        let log_format = match lookup("FV_LOG_FORMAT") {
            None => LogFormat::Text,
            Some(raw) if raw.eq_ignore_ascii_case("text") => LogFormat::Text,
            Some(raw) if raw.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(raw) => bail!("Invalid FV_LOG_FORMAT '{}': expected text or json", raw),
        };

        Ok(Self {
            quote_currency,
            as_of,
            log_format,
        })
    }

    pub fn engine_config(&self) -> anyhow::Result<EngineConfig> {
        let config = EngineConfig::default().with_default_quote_currency(&self.quote_currency);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.quote_currency, "USD");
        assert_eq!(config.as_of, None);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("FV_QUOTE_CURRENCY", " eur "),
            ("FV_AS_OF_DATE", "2024-03-14"),
            ("FV_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.quote_currency, "EUR");
        assert_eq!(config.as_of, NaiveDate::from_ymd_opt(2024, 3, 14));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(
            config.engine_config().unwrap().default_quote_currency,
            "EUR"
        );
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(Config::from_lookup(lookup(&[("FV_AS_OF_DATE", "14/03/2024")])).is_err());
        assert!(Config::from_lookup(lookup(&[("FV_LOG_FORMAT", "xml")])).is_err());
    }

    #[test]
    fn engine_config_rejects_bad_currency() {
        let config = Config::from_lookup(lookup(&[("FV_QUOTE_CURRENCY", "US$")])).unwrap();
        assert!(config.engine_config().is_err());
    }
}
