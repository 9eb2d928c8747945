//! Instrument key normalization.
//!
//! Every instrument key the engine sees goes through [`normalize_instrument_key`],
//! so transactions and quotes for the same instrument always meet on the
//! same string.
//!
//! | Asset class | Rule | Examples |
//! |-------------|------|----------|
//! | Equity | trim + uppercase | ` aapl ` -> `AAPL` |
//! | Crypto | trim + uppercase, bare symbols paired with the quote currency | `btc` -> `BTC-USD`, `eth/eur` -> `ETH/EUR` |
//! | Bullion | trim + uppercase, metal names mapped to ISO codes | `gold` -> `XAU` |

use super::AssetClass;
use crate::constants::{PAIR_SEPARATOR, PAIR_SEPARATORS};

/// Maps common metal names to their ISO 4217 codes.
pub fn metal_code(name: &str) -> Option<&'static str> {
    match name {
        "GOLD" => Some("XAU"),
        "SILVER" => Some("XAG"),
        "PLATINUM" => Some("XPT"),
        "PALLADIUM" => Some("XPD"),
        _ => None,
    }
}

/// Returns true when the key already names a pair (`BTC-USD`, `ETH/EUR`, `SOL:USD`).
pub fn is_paired_symbol(key: &str) -> bool {
    key.contains(PAIR_SEPARATORS)
}

/// Normalizes a raw instrument key for the given asset class.
///
/// Returns an empty string for blank input; callers decide whether that is an error.
pub fn normalize_instrument_key(
    raw: &str,
    asset_class: AssetClass,
    default_quote_currency: &str,
) -> String {
    let key = raw.trim().to_uppercase();
    if key.is_empty() {
        return key;
    }

    match asset_class {
        AssetClass::Crypto if !is_paired_symbol(&key) => {
            let quote_currency = default_quote_currency.trim().to_uppercase();
            if quote_currency.is_empty() {
                key
            } else {
                format!("{}{}{}", key, PAIR_SEPARATOR, quote_currency)
            }
        }
        AssetClass::Bullion => metal_code(&key).map(str::to_string).unwrap_or(key),
        _ => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equity_keys_are_trimmed_and_uppercased() {
        assert_eq!(
            normalize_instrument_key("  brk.b ", AssetClass::Equity, "USD"),
            "BRK.B"
        );
    }

    #[test]
    fn bare_crypto_symbols_get_the_default_quote_currency() {
        assert_eq!(normalize_instrument_key("btc", AssetClass::Crypto, "usd"), "BTC-USD");
        assert_eq!(normalize_instrument_key("ETH", AssetClass::Crypto, "EUR"), "ETH-EUR");
    }

    #[test]
    fn paired_crypto_symbols_are_left_alone() {
        assert_eq!(normalize_instrument_key("btc-eur", AssetClass::Crypto, "USD"), "BTC-EUR");
        assert_eq!(normalize_instrument_key("eth/btc", AssetClass::Crypto, "USD"), "ETH/BTC");
        assert_eq!(normalize_instrument_key("sol:usd", AssetClass::Crypto, "USD"), "SOL:USD");
    }

    #[test]
    fn suffixing_only_applies_to_crypto() {
        assert_eq!(normalize_instrument_key("msft", AssetClass::Equity, "USD"), "MSFT");
    }

    #[test]
    fn metal_names_map_to_iso_codes() {
        assert_eq!(normalize_instrument_key("Gold", AssetClass::Bullion, "USD"), "XAU");
        assert_eq!(normalize_instrument_key("silver", AssetClass::Bullion, "USD"), "XAG");
        assert_eq!(normalize_instrument_key("xpt", AssetClass::Bullion, "USD"), "XPT");
    }

    #[test]
    fn blank_keys_stay_blank() {
        assert_eq!(normalize_instrument_key("   ", AssetClass::Crypto, "USD"), "");
    }
}
