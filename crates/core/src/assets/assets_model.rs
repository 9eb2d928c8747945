use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Asset class a holding belongs to.
///
/// Trade-replayed classes (`Equity`, `Crypto`, `Bullion`) share one fold and
/// one quote-based valuation; the remaining classes plug synthetic holdings
/// into the same rollup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetClass {
    Equity,
    Crypto,
    Bullion,
    FixedIncome,
    /// Futures round trips, carried as realized P&L only
    Futures,
    /// Manually valued assets (property, vehicles, collectibles, ...)
    Other,
}

impl AssetClass {
    pub const ALL: [AssetClass; 6] = [
        AssetClass::Equity,
        AssetClass::Crypto,
        AssetClass::Bullion,
        AssetClass::FixedIncome,
        AssetClass::Futures,
        AssetClass::Other,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Equity => "equity",
            AssetClass::Crypto => "crypto",
            AssetClass::Bullion => "bullion",
            AssetClass::FixedIncome => "fixedIncome",
            AssetClass::Futures => "futures",
            AssetClass::Other => "other",
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            AssetClass::Equity => "Stocks",
            AssetClass::Crypto => "Crypto",
            AssetClass::Bullion => "Bullion",
            AssetClass::FixedIncome => "Fixed Income",
            AssetClass::Futures => "Futures",
            AssetClass::Other => "Other Assets",
        }
    }

    /// Whether holdings of this class are built by replaying BUY/SELL transactions.
    pub const fn is_trade_replayed(&self) -> bool {
        matches!(
            self,
            AssetClass::Equity | AssetClass::Crypto | AssetClass::Bullion
        )
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetClass {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "equity" | "equities" | "stock" | "stocks" => Ok(AssetClass::Equity),
            "crypto" | "cryptocurrency" => Ok(AssetClass::Crypto),
            "bullion" | "metal" | "metals" => Ok(AssetClass::Bullion),
            "fixedincome" | "bond" | "bonds" | "deposit" => Ok(AssetClass::FixedIncome),
            "futures" | "future" => Ok(AssetClass::Futures),
            "other" | "manual" => Ok(AssetClass::Other),
            _ => Err(format!("Unknown asset class: {}", s)),
        }
    }
}
