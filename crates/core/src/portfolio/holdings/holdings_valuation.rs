use log::debug;
use rust_decimal::Decimal;

use super::{Holding, PriceSource};
use crate::assets::AssetClass;
use crate::portfolio::positions::PositionState;
use crate::quotes::Quote;

/// Marks a position to the quote's spot price.
///
/// Products that leave the decimal range saturate at its bounds.
pub fn value(position: &PositionState, quote: &Quote, asset_class: AssetClass) -> Holding {
    let quantity = position.quantity_held;
    let spot = quote.spot_price;

    Holding {
        instrument_key: position.instrument_key.clone(),
        asset_class,
        price_source: PriceSource::Market,
        quantity_held: quantity,
        average_cost: position.average_cost,
        spot_price: spot,
        previous_close: quote.previous_close,
        market_value: quantity.saturating_mul(spot),
        unrealized_gain: spot.saturating_sub(position.average_cost).saturating_mul(quantity),
        realized_gain: position.realized_gain,
        day_gain: day_gain(quantity, spot, quote.previous_close),
    }
}

/// Values a position at its own average cost when no quote is available.
///
/// Market value equals the cost basis, so unrealized gain is zero and there
/// is no day gain.
pub fn value_at_cost(position: &PositionState, asset_class: AssetClass) -> Holding {
    debug!(
        "No quote for {}. Valuing {} units at average cost {}",
        position.instrument_key, position.quantity_held, position.average_cost
    );
    Holding {
        instrument_key: position.instrument_key.clone(),
        asset_class,
        price_source: PriceSource::CostFallback,
        quantity_held: position.quantity_held,
        average_cost: position.average_cost,
        spot_price: position.average_cost,
        previous_close: None,
        market_value: position.quantity_held.saturating_mul(position.average_cost),
        unrealized_gain: Decimal::ZERO,
        realized_gain: position.realized_gain,
        day_gain: None,
    }
}

/// `quantity * (spot - previous_close)`, only defined for a positive previous close.
pub fn day_gain(
    quantity: Decimal,
    spot: Decimal,
    previous_close: Option<Decimal>,
) -> Option<Decimal> {
    previous_close
        .filter(|close| *close > Decimal::ZERO)
        .map(|close| quantity.saturating_mul(spot.saturating_sub(close)))
}
