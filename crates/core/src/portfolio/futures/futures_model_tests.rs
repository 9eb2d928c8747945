#[cfg(test)]
mod tests {
    use crate::assets::AssetClass;
    use crate::portfolio::futures::{realized_futures_holdings, FuturesSummary};
    use crate::portfolio::holdings::PriceSource;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn summary(ticker: &str, month: &str, day: u32, gross_pl: Decimal) -> FuturesSummary {
        FuturesSummary {
            ticker: ticker.to_string(),
            contract_month: month.to_string(),
            trade_date: NaiveDate::from_ymd_opt(2025, 2, day).unwrap(),
            quantity: 1,
            gross_pl,
        }
    }

    #[test]
    fn sums_gross_pl_per_ticker() {
        let holdings = realized_futures_holdings(&[
            summary("MES", "Mar25", 3, dec!(125.50)),
            summary("MNQ", "Mar25", 4, dec!(-40)),
            summary("mes", "Jun25", 20, dec!(-25.50)),
        ]);

        assert_eq!(holdings.len(), 2);
        let mes = &holdings[0];
        assert_eq!(mes.instrument_key, "MES");
        assert_eq!(mes.realized_gain, dec!(100));
        assert_eq!(mes.asset_class, AssetClass::Futures);
        assert_eq!(mes.price_source, PriceSource::Realized);
        assert_eq!(mes.market_value, Decimal::ZERO);
        assert_eq!(mes.quantity_held, Decimal::ZERO);
        assert_eq!(mes.day_gain, None);

        assert_eq!(holdings[1].instrument_key, "MNQ");
        assert_eq!(holdings[1].realized_gain, dec!(-40));
    }

    #[test]
    fn blank_tickers_are_skipped() {
        let holdings = realized_futures_holdings(&[summary(" ", "Mar25", 3, dec!(10))]);
        assert!(holdings.is_empty());
    }

    #[test]
    fn accepts_statement_field_names() {
        let summary: FuturesSummary = serde_json::from_value(serde_json::json!({
            "ticker": "MES",
            "contractMonth": "Mar25",
            "tradeDate": "2025-02-03",
            "qty": 2,
            "grossPL": 57.5
        }))
        .unwrap();

        assert_eq!(summary.quantity, 2);
        assert_eq!(summary.gross_pl, dec!(57.5));
    }
}
