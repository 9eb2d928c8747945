use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assets::AssetClass;
use crate::utils::decimal_utils::ratio;

/// Where a holding's spot price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceSource {
    /// Latest quote from the quote snapshot.
    #[default]
    Market,
    /// No quote was available; valued at average cost.
    CostFallback,
    /// Accrued fixed-income value.
    Accrual,
    /// User-entered value.
    Manual,
    /// Closed-out positions that only carry realized gain.
    Realized,
}

/// Valuation of a single instrument at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub instrument_key: String,
    pub asset_class: AssetClass,
    pub price_source: PriceSource,
    pub quantity_held: Decimal,
    pub average_cost: Decimal,
    pub spot_price: Decimal,
    pub previous_close: Option<Decimal>,
    pub market_value: Decimal,
    pub unrealized_gain: Decimal,
    pub realized_gain: Decimal,
    /// `None` when there is no usable previous close.
    pub day_gain: Option<Decimal>,
}

impl Holding {
    pub fn cost_basis(&self) -> Decimal {
        self.quantity_held.saturating_mul(self.average_cost)
    }

    /// Value at the previous close, when one is known.
    pub fn previous_day_value(&self) -> Option<Decimal> {
        self.previous_close
            .filter(|close| *close > Decimal::ZERO)
            .map(|close| self.quantity_held.saturating_mul(close))
    }

    pub fn unrealized_gain_pct(&self) -> Option<Decimal> {
        ratio(self.unrealized_gain, self.cost_basis())
    }

    pub fn day_gain_pct(&self) -> Option<Decimal> {
        let day_gain = self.day_gain?;
        ratio(day_gain, self.previous_day_value()?)
    }

    pub fn total_gain(&self) -> Decimal {
        self.unrealized_gain.saturating_add(self.realized_gain)
    }
}
