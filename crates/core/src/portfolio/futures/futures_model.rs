use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::assets::AssetClass;
use crate::portfolio::holdings::{Holding, PriceSource};

/// One month's completed round trips for a futures symbol, as reported on
/// the broker's purchase and sale summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuturesSummary {
    pub ticker: String,
    /// Contract month as `Mon` plus two-digit year, e.g. `Mar25`.
    pub contract_month: String,
    pub trade_date: NaiveDate,
    /// Contracts closed; long and short legs match for a completed round trip.
    #[serde(alias = "qty")]
    pub quantity: u32,
    #[serde(alias = "grossPL")]
    pub gross_pl: Decimal,
}

/// Folds futures summaries into one realized-only holding per ticker.
///
/// Round trips are closed by definition, so the holdings carry no quantity,
/// no market value and no day gain.
pub fn realized_futures_holdings(summaries: &[FuturesSummary]) -> Vec<Holding> {
    let mut realized_by_ticker: BTreeMap<String, Decimal> = BTreeMap::new();
    for summary in summaries {
        let ticker = summary.ticker.trim().to_uppercase();
        if ticker.is_empty() {
            debug!(
                "Skipping futures summary for {} with a blank ticker",
                summary.trade_date
            );
            continue;
        }
        let realized = realized_by_ticker.entry(ticker).or_default();
        *realized = realized.saturating_add(summary.gross_pl);
    }

    realized_by_ticker
        .into_iter()
        .map(|(ticker, realized_gain)| Holding {
            instrument_key: ticker,
            asset_class: AssetClass::Futures,
            price_source: PriceSource::Realized,
            quantity_held: Decimal::ZERO,
            average_cost: Decimal::ZERO,
            spot_price: Decimal::ZERO,
            previous_close: None,
            market_value: Decimal::ZERO,
            unrealized_gain: Decimal::ZERO,
            realized_gain,
            day_gain: None,
        })
        .collect()
}
