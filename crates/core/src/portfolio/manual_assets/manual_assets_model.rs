use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assets::AssetClass;
use crate::errors::{Result, ValidationError};
use crate::portfolio::holdings::{day_gain, Holding, PriceSource};

/// An "other" asset tracked by a user-entered total value (a car, a
/// collectible, a private stake).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualAsset {
    pub name: String,
    /// Current total value as entered by the user.
    pub value: Decimal,
    /// What was paid for it, when known. Without it the asset shows no gain.
    #[serde(default)]
    pub cost: Option<Decimal>,
    /// Value at the previous valuation, used as the day-gain baseline.
    #[serde(default)]
    pub previous_value: Option<Decimal>,
}

impl ManualAsset {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if self.value < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "Manual asset '{}' has a negative value {}",
                self.name, self.value
            ))
            .into());
        }
        if self.cost.is_some_and(|cost| cost < Decimal::ZERO) {
            return Err(ValidationError::InvalidInput(format!(
                "Manual asset '{}' has a negative cost",
                self.name
            ))
            .into());
        }
        Ok(())
    }

    /// Single-unit holding priced at the entered value.
    pub fn to_holding(&self) -> Result<Holding> {
        self.validate()?;
        let average_cost = self.cost.unwrap_or(self.value);

        Ok(Holding {
            instrument_key: self.name.trim().to_string(),
            asset_class: AssetClass::Other,
            price_source: PriceSource::Manual,
            quantity_held: Decimal::ONE,
            average_cost,
            spot_price: self.value,
            previous_close: self.previous_value,
            market_value: self.value,
            unrealized_gain: self.value - average_cost,
            realized_gain: Decimal::ZERO,
            day_gain: day_gain(Decimal::ONE, self.value, self.previous_value),
        })
    }
}
