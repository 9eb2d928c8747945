use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transactions::{Transaction, TransactionError};
use crate::utils::decimal_utils::is_quantity_significant;

/// Running state of one instrument, rebuilt from scratch on every pass.
///
/// Cost basis follows the moving-average method: every BUY re-blends the
/// average cost, and every SELL relieves basis at the current average.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PositionState {
    pub instrument_key: String,
    pub quantity_held: Decimal,
    /// Cost of the quantity still held; reduced proportionally on sells.
    pub total_cost_basis: Decimal,
    pub average_cost: Decimal,
    pub realized_gain: Decimal,
    pub buy_count: u32,
    pub sell_count: u32,
    /// Quantity dropped because sells exceeded holdings.
    pub clamped_sell_quantity: Decimal,
    /// Transactions left out because applying them would overflow.
    pub skipped_count: u32,
    pub first_trade_date: Option<NaiveDate>,
    pub last_trade_date: Option<NaiveDate>,
}

impl PositionState {
    pub fn new(instrument_key: impl Into<String>) -> Self {
        Self {
            instrument_key: instrument_key.into(),
            ..Default::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.quantity_held > Decimal::ZERO
    }

    /// Applies a BUY: adds quantity and `quantity * price + fees` to the basis.
    ///
    /// Leaves the state untouched and returns an error when the new totals
    /// fall outside the decimal range.
    pub fn apply_buy(&mut self, transaction: &Transaction) -> Result<(), TransactionError> {
        let next = self
            .after_buy(transaction)
            .ok_or_else(|| out_of_range(transaction))?;
        *self = next;
        Ok(())
    }

    /// Applies a SELL at the current average cost.
    ///
    /// Sells larger than the held quantity are capped at the held quantity.
    /// The excess is recorded in `clamped_sell_quantity` rather than driving
    /// the position negative.
    pub fn apply_sell(&mut self, transaction: &Transaction) -> Result<(), TransactionError> {
        let next = self
            .after_sell(transaction)
            .ok_or_else(|| out_of_range(transaction))?;
        if next.clamped_sell_quantity > self.clamped_sell_quantity {
            warn!(
                "Sell of {} {} on {} exceeds held quantity {}. Clamping to held quantity.",
                transaction.quantity,
                self.instrument_key,
                transaction.date,
                self.quantity_held
            );
        }
        *self = next;
        Ok(())
    }

    fn after_buy(&self, transaction: &Transaction) -> Option<Self> {
        let mut next = self.clone();
        next.quantity_held = self.quantity_held.checked_add(transaction.quantity)?;
        next.total_cost_basis = transaction
            .gross_amount()?
            .checked_add(transaction.fees)?
            .checked_add(self.total_cost_basis)?;
        if next.quantity_held > Decimal::ZERO {
            next.average_cost = next.total_cost_basis.checked_div(next.quantity_held)?;
        }
        next.buy_count += 1;
        next.track_date(transaction.date);
        Some(next)
    }

    fn after_sell(&self, transaction: &Transaction) -> Option<Self> {
        let sell_quantity = transaction.quantity.min(self.quantity_held);
        let excess = transaction.quantity - sell_quantity;

        let proceeds = sell_quantity
            .checked_mul(transaction.unit_price)?
            .checked_sub(transaction.fees)?;
        let cost_removed = sell_quantity.checked_mul(self.average_cost)?;

        let mut next = self.clone();
        next.clamped_sell_quantity = self.clamped_sell_quantity.checked_add(excess)?;
        next.realized_gain = self
            .realized_gain
            .checked_add(proceeds.checked_sub(cost_removed)?)?;
        next.quantity_held = self.quantity_held - sell_quantity;
        next.total_cost_basis = self.total_cost_basis.checked_sub(cost_removed)?;
        next.sell_count += 1;
        next.track_date(transaction.date);
        next.recalculate_after_sell()?;
        Some(next)
    }

    /// Recomputes the average cost after a sale; a flat (or dust) position
    /// resets to zero so the next BUY starts a fresh basis.
    fn recalculate_after_sell(&mut self) -> Option<()> {
        if self.quantity_held.is_sign_positive() && is_quantity_significant(&self.quantity_held) {
            self.average_cost = self.total_cost_basis.checked_div(self.quantity_held)?;
        } else {
            if !self.quantity_held.is_zero() {
                debug!(
                    "Position {} quantity {} is below the significance threshold. Resetting to flat.",
                    self.instrument_key, self.quantity_held
                );
            }
            self.quantity_held = Decimal::ZERO;
            self.total_cost_basis = Decimal::ZERO;
            self.average_cost = Decimal::ZERO;
        }
        Some(())
    }

    fn track_date(&mut self, date: NaiveDate) {
        if self.first_trade_date.map_or(true, |first| date < first) {
            self.first_trade_date = Some(date);
        }
        if self.last_trade_date.map_or(true, |last| date > last) {
            self.last_trade_date = Some(date);
        }
    }
}

fn out_of_range(transaction: &Transaction) -> TransactionError {
    TransactionError::InvalidMagnitude {
        field: "quantity",
        value: transaction.quantity.to_string(),
        requirement: "within the representable range of the position",
    }
}
