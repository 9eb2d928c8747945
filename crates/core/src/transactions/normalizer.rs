//! Turns raw stored records into canonical [`Transaction`]s.
//!
//! Validation is strict: a record with a bad side, a non-positive quantity or
//! price, or negative fees is rejected with a [`TransactionError`] instead of
//! being coerced to zero. Whether a rejection aborts the batch or is skipped
//! is the caller's call (see [`normalize_all`] and [`normalize_batch`]).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use super::{RawTransaction, Transaction, TransactionError, TransactionSide};
use crate::assets::{normalize_instrument_key, AssetClass};
use crate::config::EngineConfig;
use crate::portfolio::IngestionWarning;

const INSTRUMENT_KEY_FIELDS: &[&str] =
    &["instrumentKey", "symbol", "ticker", "metal", "pair", "coin"];
const SIDE_FIELDS: &[&str] = &["side", "type", "action", "txType"];
const DATE_FIELDS: &[&str] = &["date", "tradeDate", "txDate"];
const QUANTITY_FIELDS: &[&str] = &["quantity", "qty", "shares", "units", "ounces", "coins"];
const UNIT_PRICE_FIELDS: &[&str] = &["unitPrice", "price", "pricePerUnit"];
const FEE_FIELDS: &[&str] = &["fees", "fee", "commission"];

lazy_static! {
    /// Digits grouped in threes by commas, with an optional fractional part.
    static ref THOUSANDS_GROUPED: Regex =
        Regex::new(r"^[+-]?\d{1,3}(,\d{3})+(\.\d+)?$").expect("Invalid thousands regex");
}

/// Normalizes a single raw record for the given asset class.
pub fn normalize(
    raw: &RawTransaction,
    asset_class: AssetClass,
    config: &EngineConfig,
) -> Result<Transaction, TransactionError> {
    let raw_key = raw
        .field(INSTRUMENT_KEY_FIELDS)
        .and_then(value_as_text)
        .unwrap_or_default();
    let instrument_key =
        normalize_instrument_key(&raw_key, asset_class, &config.default_quote_currency);
    if instrument_key.is_empty() {
        return Err(TransactionError::MissingInstrumentKey);
    }

    let side = parse_side(
        raw.field(SIDE_FIELDS)
            .ok_or(TransactionError::MissingField("side"))?,
    )?;
    let date = parse_date(
        raw.field(DATE_FIELDS)
            .ok_or(TransactionError::MissingField("date"))?,
    )?;

    let quantity = parse_decimal(
        raw.field(QUANTITY_FIELDS)
            .ok_or(TransactionError::MissingField("quantity"))?,
        "quantity",
    )?;
    ensure_positive(quantity, "quantity")?;

    let unit_price = parse_decimal(
        raw.field(UNIT_PRICE_FIELDS)
            .ok_or(TransactionError::MissingField("unitPrice"))?,
        "unitPrice",
    )?;
    ensure_positive(unit_price, "unitPrice")?;

    let fees = match raw.field(FEE_FIELDS) {
        Some(value) => parse_decimal(value, "fees")?,
        None => Decimal::ZERO,
    };
    if fees < Decimal::ZERO {
        return Err(TransactionError::InvalidMagnitude {
            field: "fees",
            value: fees.to_string(),
            requirement: "zero or positive",
        });
    }
    ensure_representable(quantity, unit_price, fees)?;

    Ok(Transaction {
        instrument_key,
        asset_class,
        side,
        date,
        quantity,
        unit_price,
        fees,
    })
}

/// Normalizes every record, aborting on the first invalid one.
pub fn normalize_all(
    records: &[RawTransaction],
    asset_class: AssetClass,
    config: &EngineConfig,
) -> Result<Vec<Transaction>, TransactionError> {
    records
        .iter()
        .map(|raw| normalize(raw, asset_class, config))
        .collect()
}

/// Normalizes every record, skipping invalid ones.
///
/// Each rejected record is logged and reported back as an [`IngestionWarning`]
/// so nothing is dropped silently.
pub fn normalize_batch(
    records: &[RawTransaction],
    asset_class: AssetClass,
    config: &EngineConfig,
) -> (Vec<Transaction>, Vec<IngestionWarning>) {
    let mut transactions = Vec::with_capacity(records.len());
    let mut warnings = Vec::new();

    for (index, raw) in records.iter().enumerate() {
        match normalize(raw, asset_class, config) {
            Ok(transaction) => transactions.push(transaction),
            Err(e) => {
                let warning = IngestionWarning {
                    asset_class: Some(asset_class),
                    record_id: raw.record_id().or_else(|| Some(format!("#{}", index))),
                    instrument_key: raw
                        .field(INSTRUMENT_KEY_FIELDS)
                        .and_then(value_as_text)
                        .map(|key| {
                            normalize_instrument_key(
                                &key,
                                asset_class,
                                &config.default_quote_currency,
                            )
                        })
                        .filter(|key| !key.is_empty()),
                    message: format!("Record skipped: {}", e),
                };
                warn!("{}", warning);
                warnings.push(warning);
            }
        }
    }

    debug!(
        "Normalized {} of {} {} records",
        transactions.len(),
        records.len(),
        asset_class
    );
    (transactions, warnings)
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_side(value: &Value) -> Result<TransactionSide, TransactionError> {
    match value {
        Value::String(s) => TransactionSide::from_str(s),
        other => Err(TransactionError::InvalidSide(other.to_string())),
    }
}

/// Parses a calendar date from `YYYY-MM-DD`, an RFC 3339 timestamp, or a
/// zone-less ISO date-time. Timestamps keep the calendar date as written.
pub fn parse_date(value: &Value) -> Result<NaiveDate, TransactionError> {
    let text = match value {
        Value::String(s) => s.trim(),
        other => return Err(TransactionError::InvalidDate(other.to_string())),
    };

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Ok(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(timestamp.date());
    }
    Err(TransactionError::InvalidDate(text.to_string()))
}

/// Parses a decimal from a JSON number or a numeric string.
///
/// Strings may use comma thousands separators (`"1,250.5"`) or scientific
/// notation. A comma anywhere else (`"1,5"`) is rejected rather than guessed
/// at, as is anything that is not a finite number (`"NaN"`, `true`, ...).
pub fn parse_decimal(value: &Value, field: &'static str) -> Result<Decimal, TransactionError> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            let s = s.trim();
            if !s.contains(',') {
                s.to_string()
            } else if THOUSANDS_GROUPED.is_match(s) {
                s.replace(',', "")
            } else {
                return Err(TransactionError::InvalidMagnitude {
                    field,
                    value: s.to_string(),
                    requirement: "a number with commas only as thousands separators",
                });
            }
        }
        other => {
            return Err(TransactionError::InvalidMagnitude {
                field,
                value: other.to_string(),
                requirement: "a finite number",
            })
        }
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| TransactionError::InvalidMagnitude {
            field,
            value: text.clone(),
            requirement: "a finite number",
        })
}

fn ensure_positive(value: Decimal, field: &'static str) -> Result<(), TransactionError> {
    if value > Decimal::ZERO {
        Ok(())
    } else {
        Err(TransactionError::InvalidMagnitude {
            field,
            value: value.to_string(),
            requirement: "greater than zero",
        })
    }
}

/// Rejects records whose cost, or cost per unit, falls outside the decimal
/// range, so replaying them cannot overflow.
fn ensure_representable(
    quantity: Decimal,
    unit_price: Decimal,
    fees: Decimal,
) -> Result<(), TransactionError> {
    let per_unit = quantity
        .checked_mul(unit_price)
        .and_then(|gross| gross.checked_add(fees))
        .and_then(|cost| cost.checked_div(quantity));
    match per_unit {
        Some(_) => Ok(()),
        None => Err(TransactionError::InvalidMagnitude {
            field: "quantity",
            value: quantity.to_string(),
            requirement: "within the representable cost range for its price and fees",
        }),
    }
}
