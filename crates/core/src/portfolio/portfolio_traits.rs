//! Portfolio service traits.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::holdings::Holding;
use super::portfolio_model::{PortfolioInput, PortfolioSummary};
use super::rollup::PortfolioTotals;
use crate::assets::AssetClass;
use crate::errors::Result;
use crate::quotes::{Quote, QuoteSnapshot};
use crate::transactions::Transaction;

/// Trait defining the contract for portfolio valuation.
///
/// Every operation is deterministic: the same inputs always produce the same
/// output, so callers may recompute as often as they like.
pub trait PortfolioServiceTrait: Send + Sync {
    /// Values one instrument from its transaction history and latest quote.
    ///
    /// The transactions must all belong to the same instrument.
    fn compute_holding(&self, transactions: &[Transaction], quote: &Quote) -> Holding;

    /// Totals across every asset class, with best-effort day gain.
    fn compute_totals(
        &self,
        holdings_by_class: &BTreeMap<AssetClass, Vec<Holding>>,
    ) -> PortfolioTotals;

    /// Builds a full summary from raw records.
    ///
    /// Invalid trade records are skipped and reported in `warnings`;
    /// invalid fixed-income or manual-asset entries fail the whole pass.
    fn build_summary(
        &self,
        input: &PortfolioInput,
        quotes: &QuoteSnapshot,
        as_of: NaiveDate,
    ) -> Result<PortfolioSummary>;
}
