use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::holdings::Holding;
use crate::utils::decimal_utils::ratio;

/// Aggregate of any set of holdings: one asset class or the whole portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    pub market_value: Decimal,
    pub unrealized_gain: Decimal,
    pub realized_gain: Decimal,
    pub total_cost_basis: Decimal,
    pub previous_day_value: Decimal,
    /// Sum of the defined day gains; `None` only when no holding had one.
    pub day_gain: Option<Decimal>,
    pub holding_count: usize,
}

impl PortfolioTotals {
    /// Sums saturate at the decimal bounds instead of overflowing.
    pub fn add_holding(&mut self, holding: &Holding) {
        self.market_value = self.market_value.saturating_add(holding.market_value);
        self.unrealized_gain = self.unrealized_gain.saturating_add(holding.unrealized_gain);
        self.realized_gain = self.realized_gain.saturating_add(holding.realized_gain);
        self.total_cost_basis = self.total_cost_basis.saturating_add(holding.cost_basis());
        if let Some(value) = holding.previous_day_value() {
            self.previous_day_value = self.previous_day_value.saturating_add(value);
        }
        self.day_gain = add_day_gain(self.day_gain, holding.day_gain);
        self.holding_count += 1;
    }

    /// Combines two aggregates with the same rules used for single holdings.
    pub fn merge(&mut self, other: &PortfolioTotals) {
        self.market_value = self.market_value.saturating_add(other.market_value);
        self.unrealized_gain = self.unrealized_gain.saturating_add(other.unrealized_gain);
        self.realized_gain = self.realized_gain.saturating_add(other.realized_gain);
        self.total_cost_basis = self.total_cost_basis.saturating_add(other.total_cost_basis);
        self.previous_day_value = self.previous_day_value.saturating_add(other.previous_day_value);
        self.day_gain = add_day_gain(self.day_gain, other.day_gain);
        self.holding_count += other.holding_count;
    }

    pub fn total_gain(&self) -> Decimal {
        self.unrealized_gain.saturating_add(self.realized_gain)
    }

    pub fn unrealized_gain_pct(&self) -> Option<Decimal> {
        ratio(self.unrealized_gain, self.total_cost_basis)
    }

    pub fn day_gain_pct(&self) -> Option<Decimal> {
        ratio(self.day_gain?, self.previous_day_value)
    }
}

/// Best-effort day-gain sum: a missing side contributes zero, and the result
/// is `None` only when both sides are.
fn add_day_gain(total: Option<Decimal>, next: Option<Decimal>) -> Option<Decimal> {
    match (total, next) {
        (None, None) => None,
        (total, next) => Some(
            total
                .unwrap_or_default()
                .saturating_add(next.unwrap_or_default()),
        ),
    }
}

impl<'a> FromIterator<&'a Holding> for PortfolioTotals {
    fn from_iter<I: IntoIterator<Item = &'a Holding>>(iter: I) -> Self {
        let mut totals = PortfolioTotals::default();
        for holding in iter {
            totals.add_holding(holding);
        }
        totals
    }
}
