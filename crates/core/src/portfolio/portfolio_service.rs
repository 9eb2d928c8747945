//! Portfolio valuation service implementation.

use chrono::NaiveDate;
use log::{debug, info, warn};
use std::collections::BTreeMap;

use super::fixed_income::value_fixed_income;
use super::futures::realized_futures_holdings;
use super::holdings::{value, value_at_cost, Holding};
use super::portfolio_model::{IngestionWarning, PortfolioInput, PortfolioSummary};
use super::portfolio_traits::PortfolioServiceTrait;
use super::positions::{fold, group_by_instrument};
use super::rollup::{group_by_class, rollup, rollup_by_class, PortfolioTotals};
use crate::assets::AssetClass;
use crate::config::EngineConfig;
use crate::errors::Result;
use crate::quotes::{Quote, QuoteSnapshot};
use crate::transactions::{normalize_batch, Transaction};

/// Service for valuing a portfolio snapshot.
#[derive(Debug, Clone, Default)]
pub struct PortfolioService {
    config: EngineConfig,
}

impl PortfolioService {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replays and values every instrument of one trade-replayed class.
    fn value_trades(
        &self,
        asset_class: AssetClass,
        transactions: Vec<Transaction>,
        quotes: &QuoteSnapshot,
        warnings: &mut Vec<IngestionWarning>,
    ) -> Vec<Holding> {
        group_by_instrument(transactions)
            .into_iter()
            .map(|(instrument_key, history)| {
                let position = fold(&history);
                if position.skipped_count > 0 {
                    warnings.push(IngestionWarning {
                        asset_class: Some(asset_class),
                        record_id: None,
                        instrument_key: Some(instrument_key.clone()),
                        message: format!(
                            "{} transactions left out because they overflow the position",
                            position.skipped_count
                        ),
                    });
                }
                match quotes.get(&instrument_key) {
                    Some(quote) => value(&position, quote, asset_class),
                    None => {
                        if position.is_open() {
                            let warning = IngestionWarning {
                                asset_class: Some(asset_class),
                                record_id: None,
                                instrument_key: Some(instrument_key.clone()),
                                message: "No quote available; valued at average cost"
                                    .to_string(),
                            };
                            warn!("{}", warning);
                            warnings.push(warning);
                        }
                        value_at_cost(&position, asset_class)
                    }
                }
            })
            .collect()
    }
}

impl PortfolioServiceTrait for PortfolioService {
    fn compute_holding(&self, transactions: &[Transaction], quote: &Quote) -> Holding {
        let asset_class = transactions
            .first()
            .map(|t| t.asset_class)
            .unwrap_or(AssetClass::Equity);
        value(&fold(transactions), quote, asset_class)
    }

    fn compute_totals(
        &self,
        holdings_by_class: &BTreeMap<AssetClass, Vec<Holding>>,
    ) -> PortfolioTotals {
        rollup(holdings_by_class)
    }

    fn build_summary(
        &self,
        input: &PortfolioInput,
        quotes: &QuoteSnapshot,
        as_of: NaiveDate,
    ) -> Result<PortfolioSummary> {
        self.config.validate()?;

        let mut warnings = Vec::new();
        let mut holdings = Vec::new();

        for (asset_class, records) in input.trade_records() {
            let (transactions, skipped) = normalize_batch(records, asset_class, &self.config);
            warnings.extend(skipped);
            holdings.extend(self.value_trades(asset_class, transactions, quotes, &mut warnings));
        }

        for position in &input.fixed_income {
            holdings.push(value_fixed_income(position, as_of, &self.config)?);
        }
        for asset in &input.manual_assets {
            holdings.push(asset.to_holding()?);
        }
        holdings.extend(realized_futures_holdings(&input.futures));

        let holdings_by_class = group_by_class(&holdings);
        let by_class = rollup_by_class(&holdings_by_class);
        let totals = rollup(&holdings_by_class);

        debug!(
            "Built summary as of {}: {} holdings across {} classes",
            as_of,
            holdings.len(),
            by_class.len()
        );
        if !warnings.is_empty() {
            info!(
                "Portfolio summary as of {} completed with {} warnings",
                as_of,
                warnings.len()
            );
        }

        Ok(PortfolioSummary {
            as_of,
            holdings,
            by_class,
            totals,
            warnings,
        })
    }
}
