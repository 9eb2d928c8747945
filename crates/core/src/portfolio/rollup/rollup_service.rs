use std::collections::BTreeMap;

use super::PortfolioTotals;
use crate::assets::AssetClass;
use crate::portfolio::holdings::Holding;

/// Totals across every holding of every asset class.
///
/// Market value, unrealized and realized gains are summed unconditionally.
/// Day gain is best effort: holdings without one contribute zero, and the
/// total is `None` only when no holding anywhere has a day gain.
pub fn rollup(holdings_by_class: &BTreeMap<AssetClass, Vec<Holding>>) -> PortfolioTotals {
    holdings_by_class.values().flatten().collect()
}

/// Per-class totals, using the same rules as [`rollup`] within each class.
pub fn rollup_by_class(
    holdings_by_class: &BTreeMap<AssetClass, Vec<Holding>>,
) -> BTreeMap<AssetClass, PortfolioTotals> {
    holdings_by_class
        .iter()
        .map(|(class, holdings)| (*class, holdings.iter().collect()))
        .collect()
}

/// Groups a flat list of holdings by asset class.
pub fn group_by_class(holdings: &[Holding]) -> BTreeMap<AssetClass, Vec<Holding>> {
    let mut grouped: BTreeMap<AssetClass, Vec<Holding>> = BTreeMap::new();
    for holding in holdings {
        grouped
            .entry(holding.asset_class)
            .or_default()
            .push(holding.clone());
    }
    grouped
}
