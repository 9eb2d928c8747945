//! Transaction domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

use super::TransactionError;
use crate::assets::AssetClass;

/// Side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionSide {
    Buy,
    Sell,
}

impl TransactionSide {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionSide::Buy => "BUY",
            TransactionSide::Sell => "SELL",
        }
    }
}

impl FromStr for TransactionSide {
    type Err = TransactionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(TransactionSide::Buy),
            "SELL" => Ok(TransactionSide::Sell),
            _ => Err(TransactionError::InvalidSide(s.to_string())),
        }
    }
}

/// Canonical, validated transaction consumed by the position accumulator.
///
/// Only the normalizer builds these from stored records, so every instance
/// satisfies `quantity > 0`, `unit_price > 0` and `fees >= 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub instrument_key: String,
    pub asset_class: AssetClass,
    pub side: TransactionSide,
    pub date: NaiveDate,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub fees: Decimal,
}

impl Transaction {
    /// Quantity times unit price, before fees; `None` on overflow.
    pub fn gross_amount(&self) -> Option<Decimal> {
        self.quantity.checked_mul(self.unit_price)
    }
}

/// A transaction record as persisted by the storage layer.
///
/// Field names and casing vary between pages and import paths, so the record
/// is kept as a loose JSON object and read through alias lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTransaction(pub Map<String, Value>);

const RECORD_ID_FIELDS: &[&str] = &["id", "txId", "transactionId", "assetId"];

impl RawTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a raw record from a JSON value; only objects are records.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    /// Returns the first non-null value whose name matches one of `aliases`,
    /// comparing names case-insensitively. Aliases are tried in order.
    pub fn field(&self, aliases: &[&str]) -> Option<&Value> {
        aliases.iter().find_map(|alias| {
            self.0
                .iter()
                .find(|(name, value)| name.eq_ignore_ascii_case(alias) && !value.is_null())
                .map(|(_, value)| value)
        })
    }

    /// Storage identifier of the record, when it carries one.
    pub fn record_id(&self) -> Option<String> {
        self.field(RECORD_ID_FIELDS).and_then(|value| match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }
}
