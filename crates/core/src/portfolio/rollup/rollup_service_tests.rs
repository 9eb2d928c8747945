#[cfg(test)]
mod tests {
    use crate::assets::AssetClass;
    use crate::portfolio::holdings::{Holding, PriceSource};
    use crate::portfolio::rollup::{group_by_class, rollup, rollup_by_class, PortfolioTotals};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn holding(
        key: &str,
        asset_class: AssetClass,
        quantity: Decimal,
        average_cost: Decimal,
        spot: Decimal,
        previous_close: Option<Decimal>,
    ) -> Holding {
        Holding {
            instrument_key: key.to_string(),
            asset_class,
            price_source: PriceSource::Market,
            quantity_held: quantity,
            average_cost,
            spot_price: spot,
            previous_close,
            market_value: quantity * spot,
            unrealized_gain: (spot - average_cost) * quantity,
            realized_gain: Decimal::ZERO,
            day_gain: previous_close
                .filter(|close| *close > Decimal::ZERO)
                .map(|close| quantity * (spot - close)),
        }
    }

    fn portfolio() -> BTreeMap<AssetClass, Vec<Holding>> {
        let mut stock = holding(
            "ACME",
            AssetClass::Equity,
            dec!(6),
            dec!(100.5),
            dec!(110),
            Some(dec!(105)),
        );
        stock.realized_gain = dec!(76);
        let coin = holding(
            "BTC-USD",
            AssetClass::Crypto,
            dec!(0.5),
            dec!(40000),
            dec!(42000),
            None,
        );
        let gold = holding(
            "XAU",
            AssetClass::Bullion,
            dec!(2),
            dec!(1900),
            dec!(2000),
            Some(dec!(0)),
        );

        BTreeMap::from([
            (AssetClass::Equity, vec![stock]),
            (AssetClass::Crypto, vec![coin]),
            (AssetClass::Bullion, vec![gold]),
        ])
    }

    #[test]
    fn sums_values_unconditionally() {
        let totals = rollup(&portfolio());

        assert_eq!(totals.market_value, dec!(660) + dec!(21000) + dec!(4000));
        assert_eq!(totals.unrealized_gain, dec!(57) + dec!(1000) + dec!(200));
        assert_eq!(totals.realized_gain, dec!(76));
        assert_eq!(totals.total_cost_basis, dec!(603) + dec!(20000) + dec!(3800));
        assert_eq!(totals.holding_count, 3);
        assert_eq!(totals.total_gain(), dec!(1333));
    }

    #[test]
    fn day_gain_is_best_effort() {
        let totals = rollup(&portfolio());

        // Only the stock has a usable previous close.
        assert_eq!(totals.day_gain, Some(dec!(30)));
        assert_eq!(totals.previous_day_value, dec!(630));
        assert_eq!(totals.day_gain_pct(), Some(dec!(0.0476)));
    }

    #[test]
    fn day_gain_is_none_only_when_no_holding_has_one() {
        let mut holdings = portfolio();
        holdings.remove(&AssetClass::Equity);

        let totals = rollup(&holdings);
        assert_eq!(totals.day_gain, None);
        assert_eq!(totals.day_gain_pct(), None);
        assert_eq!(totals.previous_day_value, Decimal::ZERO);
    }

    #[test]
    fn zero_day_gain_still_counts_as_defined() {
        let holdings = BTreeMap::from([(
            AssetClass::Equity,
            vec![holding("ACME", AssetClass::Equity, dec!(1), dec!(10), dec!(9), Some(dec!(9)))],
        )]);
        assert_eq!(rollup(&holdings).day_gain, Some(dec!(0)));
    }

    #[test]
    fn empty_portfolio_has_zero_totals() {
        let totals = rollup(&BTreeMap::new());
        assert_eq!(totals, PortfolioTotals::default());
        assert_eq!(totals.unrealized_gain_pct(), None);
    }

    #[test]
    fn per_class_totals_merge_into_the_combined_total() {
        let holdings = portfolio();
        let by_class = rollup_by_class(&holdings);

        assert_eq!(by_class.len(), 3);
        assert_eq!(by_class[&AssetClass::Crypto].day_gain, None);
        assert_eq!(by_class[&AssetClass::Bullion].day_gain, None);
        assert_eq!(by_class[&AssetClass::Equity].day_gain, Some(dec!(30)));

        let mut merged = PortfolioTotals::default();
        for totals in by_class.values() {
            merged.merge(totals);
        }
        assert_eq!(merged, rollup(&holdings));
    }

    #[test]
    fn groups_flat_holdings_by_class() {
        let flat: Vec<Holding> = portfolio().into_values().flatten().collect();
        let grouped = group_by_class(&flat);

        assert_eq!(grouped, portfolio());
    }
}
