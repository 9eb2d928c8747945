use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::assets::AssetClass;
use crate::portfolio::fixed_income::FixedIncomePosition;
use crate::portfolio::futures::FuturesSummary;
use crate::portfolio::holdings::Holding;
use crate::portfolio::manual_assets::ManualAsset;
use crate::portfolio::rollup::PortfolioTotals;
use crate::transactions::RawTransaction;

/// A record that was skipped or degraded while building a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionWarning {
    pub asset_class: Option<AssetClass>,
    pub record_id: Option<String>,
    pub instrument_key: Option<String>,
    pub message: String,
}

impl fmt::Display for IngestionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} record {} (instrument: {}): {}",
            self.asset_class.map(|c| c.as_str()).unwrap_or("unknown"),
            self.record_id.as_deref().unwrap_or("-"),
            self.instrument_key.as_deref().unwrap_or("-"),
            self.message
        )
    }
}

/// Everything a user has recorded, as handed over by the storage layer.
///
/// Trade records stay raw so that one bad record can be skipped without
/// losing the rest of the batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioInput {
    pub equity: Vec<RawTransaction>,
    pub crypto: Vec<RawTransaction>,
    pub bullion: Vec<RawTransaction>,
    pub fixed_income: Vec<FixedIncomePosition>,
    pub manual_assets: Vec<ManualAsset>,
    pub futures: Vec<FuturesSummary>,
}

impl PortfolioInput {
    /// Trade records of the asset classes valued by replaying buys and sells.
    pub fn trade_records(&self) -> [(AssetClass, &[RawTransaction]); 3] {
        [
            (AssetClass::Equity, self.equity.as_slice()),
            (AssetClass::Crypto, self.crypto.as_slice()),
            (AssetClass::Bullion, self.bullion.as_slice()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.equity.is_empty()
            && self.crypto.is_empty()
            && self.bullion.is_empty()
            && self.fixed_income.is_empty()
            && self.manual_assets.is_empty()
            && self.futures.is_empty()
    }
}

/// One computation pass over a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub as_of: NaiveDate,
    pub holdings: Vec<Holding>,
    pub by_class: BTreeMap<AssetClass, PortfolioTotals>,
    pub totals: PortfolioTotals,
    pub warnings: Vec<IngestionWarning>,
}

impl PortfolioSummary {
    pub fn empty(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            holdings: Vec::new(),
            by_class: BTreeMap::new(),
            totals: PortfolioTotals::default(),
            warnings: Vec::new(),
        }
    }

    pub fn holding(&self, instrument_key: &str) -> Option<&Holding> {
        self.holdings
            .iter()
            .find(|h| h.instrument_key.eq_ignore_ascii_case(instrument_key))
    }

    /// Market value across every class.
    pub fn net_worth(&self) -> Decimal {
        self.totals.market_value
    }
}
