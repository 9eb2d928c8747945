//! Quotes module - the price snapshot the valuation step joins against.
//!
//! Fetching and caching quotes is the job of an external collaborator; the
//! engine only ever sees an explicit [`QuoteSnapshot`] built for one pass.

mod quotes_model;

pub use quotes_model::{Quote, QuoteSnapshot};
