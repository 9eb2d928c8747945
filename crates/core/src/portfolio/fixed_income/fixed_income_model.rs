use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Result, ValidationError};

/// How often interest is capitalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Compounding {
    #[default]
    Simple,
    Annually,
    SemiAnnually,
    Quarterly,
    Monthly,
    Daily,
}

impl Compounding {
    /// Compounding periods per year; `None` for simple interest.
    pub fn periods_per_year(&self) -> Option<u32> {
        match self {
            Compounding::Simple => None,
            Compounding::Annually => Some(1),
            Compounding::SemiAnnually => Some(2),
            Compounding::Quarterly => Some(4),
            Compounding::Monthly => Some(12),
            Compounding::Daily => Some(365),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Compounding::Simple => "simple",
            Compounding::Annually => "annually",
            Compounding::SemiAnnually => "semiAnnually",
            Compounding::Quarterly => "quarterly",
            Compounding::Monthly => "monthly",
            Compounding::Daily => "daily",
        }
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Compounding {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        match folded.as_str() {
            "simple" | "none" => Ok(Compounding::Simple),
            "annually" | "annual" | "yearly" => Ok(Compounding::Annually),
            "semiannually" | "semiannual" => Ok(Compounding::SemiAnnually),
            "quarterly" => Ok(Compounding::Quarterly),
            "monthly" => Ok(Compounding::Monthly),
            "daily" => Ok(Compounding::Daily),
            _ => Err(ValidationError::InvalidInput(format!(
                "Unknown compounding frequency '{}'",
                s
            ))),
        }
    }
}

/// A deposit, bond or note valued by interest accrual instead of quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedIncomePosition {
    pub name: String,
    pub principal: Decimal,
    /// Annual rate as a fraction (`0.05` for 5%).
    pub annual_rate: Decimal,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub maturity_date: Option<NaiveDate>,
    #[serde(default)]
    pub compounding: Compounding,
}

impl FixedIncomePosition {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if self.principal < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "Fixed income '{}' has a negative principal {}",
                self.name, self.principal
            ))
            .into());
        }
        if self.annual_rate < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "Fixed income '{}' has a negative annual rate {}",
                self.name, self.annual_rate
            ))
            .into());
        }
        if let Some(maturity) = self.maturity_date {
            if maturity < self.start_date {
                return Err(ValidationError::InvalidInput(format!(
                    "Fixed income '{}' matures on {} before its start date {}",
                    self.name, maturity, self.start_date
                ))
                .into());
            }
        }
        Ok(())
    }

    pub fn is_matured(&self, as_of: NaiveDate) -> bool {
        self.maturity_date.is_some_and(|maturity| as_of >= maturity)
    }

    /// Last date interest accrues to: `as_of` capped at maturity.
    pub fn accrual_end(&self, as_of: NaiveDate) -> NaiveDate {
        match self.maturity_date {
            Some(maturity) if maturity < as_of => maturity,
            _ => as_of,
        }
    }
}
