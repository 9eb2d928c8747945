#[cfg(test)]
mod tests {
    use crate::errors::Error;
    use crate::portfolio::futures::{
        format_contract_month, parse_purchase_and_sale_summary, parse_summary_rows,
        section_text, PURCHASE_AND_SALE_SUMMARY,
    };
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    const STATEMENT: &str = "\
Monthly Trade Confirmations
2025-02-03 US 1 0 MES 2025 3 CME 2025-03-21 BUY 5,712.25
Purchase and Sale Summary
Trade Date Country Long Short Symbol Year Month Exchange Expiration Gross P&L Currency Description
2025-02-03 US 1 1 MES 2025 3 CME 2025-03-21 125.50 USD Micro E-mini S&P 500
2025-02-14 US 2 2 MNQ 2025 3 CME 2025-03-21 -80.00 USD Micro E-mini Nasdaq-100
Total 45.50 USD
Open Positions
2025-02-27 US 1 0 MES 2025 6 CME 2025-06-20 10.00 USD Micro E-mini S&P 500
Journal Entries
";

    #[test]
    fn parses_rows_from_the_summary_section_only() {
        let rows = parse_purchase_and_sale_summary(STATEMENT).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].ticker, "MES");
        assert_eq!(rows[0].contract_month, "Mar25");
        assert_eq!(
            rows[0].trade_date,
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap()
        );
        assert_eq!(rows[0].quantity, 1);
        assert_eq!(rows[0].gross_pl, dec!(125.50));

        assert_eq!(rows[1].ticker, "MNQ");
        assert_eq!(rows[1].quantity, 2);
        assert_eq!(rows[1].gross_pl, dec!(-80.00));
    }

    #[test]
    fn section_ends_at_the_next_header() {
        let section = section_text(STATEMENT, PURCHASE_AND_SALE_SUMMARY).unwrap();
        assert!(section.contains("MNQ"));
        assert!(!section.contains("Open Positions"));
        assert!(!section.contains("2025 6 CME"));
    }

    #[test]
    fn shorter_header_does_not_cut_the_summary_short() {
        let statement = "Purchase and Sale Summary\n\
2025-01-10 US 1 1 MGC 2025 4 COMEX 2025-04-28 33.00 USD Micro Gold\n\
Purchase and Sale\n\
2025-01-11 US 1 1 MCL 2025 4 NYMEX 2025-04-21 12.00 USD Micro Crude\n";

        let rows = parse_purchase_and_sale_summary(statement).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ticker, "MGC");
        assert_eq!(rows[0].contract_month, "Apr25");
    }

    #[test]
    fn missing_section_yields_no_rows() {
        let rows = parse_purchase_and_sale_summary("Open Positions\nnothing here\n").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn impossible_contract_month_is_an_error() {
        let section = "2025-02-03 US 1 1 MES 2025 13 CME 2025-03-21 125.50 USD";
        assert!(matches!(
            parse_summary_rows(section),
            Err(Error::Statement(_))
        ));
    }

    #[test]
    fn malformed_amount_is_an_error() {
        let section = "2025-02-03 US 1 1 MES 2025 3 CME 2025-03-21 1.2.3 USD";
        assert!(matches!(
            parse_summary_rows(section),
            Err(Error::Statement(_))
        ));
    }

    #[test]
    fn contract_month_uses_short_name_and_two_digit_year() {
        assert_eq!(format_contract_month(2025, 3).as_deref(), Some("Mar25"));
        assert_eq!(format_contract_month(2030, 12).as_deref(), Some("Dec30"));
        assert_eq!(format_contract_month(2025, 0), None);
    }
}
