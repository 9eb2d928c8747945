use chrono::NaiveDate;
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::FuturesSummary;
use crate::errors::{Error, Result};

pub const PURCHASE_AND_SALE_SUMMARY: &str = "Purchase and Sale Summary";

/// Section headers that appear in monthly futures statements.
pub const STATEMENT_SECTION_HEADERS: &[&str] = &[
    "Monthly Trade Confirmations",
    "Trade Confirmation Summary",
    PURCHASE_AND_SALE_SUMMARY,
    "Purchase and Sale",
    "Open Positions",
    "Journal Entries",
];

lazy_static! {
    /// DATE US QTY_LONG QTY_SHORT SYMBOL YEAR MONTH EXCHANGE EXP_DATE GROSS_PL USD DESCRIPTION
    static ref SUMMARY_ROW_REGEX: Regex = Regex::new(
        r"^(\d{4}-\d{2}-\d{2})\s+US\s+(\d+)\s+(\d+)\s+([A-Z]+)\s+(\d{4})\s+(\d+)\s+\w+\s+[\d-]+\s+([-\d.]+)\s+USD"
    )
    .expect("Invalid regex pattern");
}

/// Returns the body of `header`'s section: the text after the header up to
/// the next known header, or the end of the statement.
pub fn section_text<'a>(statement: &'a str, header: &str) -> Option<&'a str> {
    let start = statement.find(header)? + header.len();
    let rest = &statement[start..];
    let end = STATEMENT_SECTION_HEADERS
        .iter()
        .filter(|other| **other != header)
        .filter_map(|other| rest.find(other))
        .min()
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Formats a contract month as `Mon` + two-digit year (`2025, 3` -> `Mar25`).
pub fn format_contract_month(year: i32, month: u32) -> Option<String> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|date| date.format("%b%y").to_string())
}

/// Parses the rows of a purchase and sale summary section.
///
/// Lines that do not look like summary rows (column headings, totals, page
/// footers) are ignored. A line that matches the row layout but carries an
/// impossible date, month or amount is an error.
pub fn parse_summary_rows(section: &str) -> Result<Vec<FuturesSummary>> {
    let mut rows = Vec::new();
    for line in section.lines() {
        let Some(caps) = SUMMARY_ROW_REGEX.captures(line.trim()) else {
            continue;
        };

        let trade_date = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").map_err(|e| {
            Error::Statement(format!("Invalid trade date '{}': {}", &caps[1], e))
        })?;
        let quantity = caps[2]
            .parse::<u32>()
            .map_err(|e| Error::Statement(format!("Invalid quantity '{}': {}", &caps[2], e)))?;
        let year = caps[5]
            .parse::<i32>()
            .map_err(|e| Error::Statement(format!("Invalid contract year '{}': {}", &caps[5], e)))?;
        let month = caps[6]
            .parse::<u32>()
            .map_err(|e| {
                Error::Statement(format!("Invalid contract month '{}': {}", &caps[6], e))
            })?;
        let contract_month = format_contract_month(year, month).ok_or_else(|| {
            Error::Statement(format!("Invalid contract month {}-{}", year, month))
        })?;
        let gross_pl = Decimal::from_str(&caps[7])
            .map_err(|e| Error::Statement(format!("Invalid gross P&L '{}': {}", &caps[7], e)))?;

        if caps[2] != caps[3] {
            debug!(
                "Summary row for {} on {} has unequal legs (long {}, short {})",
                &caps[4], trade_date, &caps[2], &caps[3]
            );
        }

        rows.push(FuturesSummary {
            ticker: caps[4].to_string(),
            contract_month,
            trade_date,
            quantity,
            gross_pl,
        });
    }
    Ok(rows)
}

/// Extracts futures round trips from the text of a monthly statement.
///
/// A statement without a purchase and sale summary yields no rows.
pub fn parse_purchase_and_sale_summary(statement: &str) -> Result<Vec<FuturesSummary>> {
    let Some(section) = section_text(statement, PURCHASE_AND_SALE_SUMMARY) else {
        warn!("Statement has no '{}' section", PURCHASE_AND_SALE_SUMMARY);
        return Ok(Vec::new());
    };
    let rows = parse_summary_rows(section)?;
    debug!("Parsed {} purchase and sale summary rows", rows.len());
    Ok(rows)
}
