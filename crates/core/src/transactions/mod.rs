//! Transactions module - canonical trade records and their normalizer.

mod normalizer;
mod transactions_errors;
mod transactions_model;


pub use normalizer::{normalize, normalize_all, normalize_batch, parse_date, parse_decimal};
pub use transactions_errors::TransactionError;
pub use transactions_model::{RawTransaction, Transaction, TransactionSide};
