//! Finvault Core - lot accounting and valuation engine.
//!
//! This crate turns a user's BUY/SELL history and a quote snapshot into
//! per-instrument holdings and portfolio totals. It is a pure, synchronous
//! computation: storage, quote fetching and presentation live elsewhere and
//! hand their data in through the types exposed here.

pub mod assets;
pub mod config;
pub mod constants;
pub mod errors;
pub mod portfolio;
pub mod quotes;
pub mod transactions;
pub mod utils;

// Re-export the types most callers need
pub use assets::AssetClass;
pub use config::EngineConfig;
pub use portfolio::*;
pub use quotes::{Quote, QuoteSnapshot};
pub use transactions::{RawTransaction, Transaction, TransactionError, TransactionSide};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
