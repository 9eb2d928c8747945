//! Realized P&L from futures round trips and the broker statement importer.

mod futures_model;
mod statement_parser;

pub use futures_model::*;
pub use statement_parser::*;

#[cfg(test)]
mod futures_model_tests;
#[cfg(test)]
mod statement_parser_tests;
