//! Quote snapshot supplied by the price-fetch collaborator.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Latest price for one instrument.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub spot_price: Decimal,
    /// Previous session close. Providers often serialize a missing close as
    /// zero, so only a strictly positive value counts as known.
    #[serde(default)]
    pub previous_close: Option<Decimal>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Quote {
    pub fn new(spot_price: Decimal) -> Self {
        Self {
            spot_price,
            previous_close: None,
            timestamp: None,
        }
    }

    pub fn with_previous_close(mut self, previous_close: Decimal) -> Self {
        self.previous_close = Some(previous_close);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Previous close usable as a day-gain baseline (present and > 0).
    pub fn known_previous_close(&self) -> Option<Decimal> {
        self.previous_close.filter(|close| *close > Decimal::ZERO)
    }
}

/// Immutable set of quotes for one computation pass, keyed by instrument key.
///
/// Keys are trimmed and uppercased on insert and lookup so they meet the
/// normalized keys carried by transactions.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(from = "HashMap<String, Quote>", into = "HashMap<String, Quote>")]
pub struct QuoteSnapshot {
    quotes: HashMap<String, Quote>,
}

fn snapshot_key(instrument_key: &str) -> String {
    instrument_key.trim().to_uppercase()
}

impl QuoteSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, instrument_key: &str, quote: Quote) -> Option<Quote> {
        self.quotes.insert(snapshot_key(instrument_key), quote)
    }

    pub fn with_quote(mut self, instrument_key: &str, quote: Quote) -> Self {
        self.insert(instrument_key, quote);
        self
    }

    pub fn get(&self, instrument_key: &str) -> Option<&Quote> {
        self.quotes.get(&snapshot_key(instrument_key))
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl From<HashMap<String, Quote>> for QuoteSnapshot {
    fn from(quotes: HashMap<String, Quote>) -> Self {
        quotes.into_iter().collect()
    }
}

impl From<QuoteSnapshot> for HashMap<String, Quote> {
    fn from(snapshot: QuoteSnapshot) -> Self {
        snapshot.quotes
    }
}

impl FromIterator<(String, Quote)> for QuoteSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, Quote)>>(iter: I) -> Self {
        let mut snapshot = QuoteSnapshot::new();
        for (key, quote) in iter {
            snapshot.insert(&key, quote);
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn zero_previous_close_is_unknown() {
        let quote = Quote::new(dec!(10)).with_previous_close(dec!(0));
        assert_eq!(quote.known_previous_close(), None);
        assert_eq!(Quote::new(dec!(10)).known_previous_close(), None);
        assert_eq!(
            Quote::new(dec!(10))
                .with_previous_close(dec!(9.5))
                .known_previous_close(),
            Some(dec!(9.5))
        );
    }

    #[test]
    fn lookups_ignore_case_and_whitespace() {
        let snapshot = QuoteSnapshot::new().with_quote(" btc-usd ", Quote::new(dec!(65000)));
        assert_eq!(snapshot.get("BTC-USD").map(|q| q.spot_price), Some(dec!(65000)));
        assert_eq!(snapshot.get("btc-usd ").map(|q| q.spot_price), Some(dec!(65000)));
        assert!(snapshot.get("ETH-USD").is_none());
    }

    #[test]
    fn deserializes_from_a_plain_map() {
        let snapshot: QuoteSnapshot = serde_json::from_str(
            r#"{"aapl": {"spotPrice": 190.5, "previousClose": 188}, "XAU": {"spotPrice": 2300}}"#,
        )
        .unwrap();
        assert_eq!(snapshot.len(), 2);
        let aapl = snapshot.get("AAPL").unwrap();
        assert_eq!(aapl.spot_price, dec!(190.5));
        assert_eq!(aapl.previous_close, Some(dec!(188)));
        assert_eq!(snapshot.get("xau").unwrap().previous_close, None);
    }
}
