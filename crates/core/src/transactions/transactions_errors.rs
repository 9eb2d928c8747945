use thiserror::Error;

/// Reasons a raw transaction record is rejected at ingestion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Invalid side '{0}': expected BUY or SELL")]
    InvalidSide(String),

    #[error("Invalid {field} '{value}': must be {requirement}")]
    InvalidMagnitude {
        field: &'static str,
        value: String,
        requirement: &'static str,
    },

    #[error("Instrument key is missing or blank")]
    MissingInstrumentKey,

    #[error("Required field '{0}' is missing")]
    MissingField(&'static str),

    #[error("Invalid date '{0}': expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate(String),
}

impl From<TransactionError> for String {
    fn from(error: TransactionError) -> Self {
        error.to_string()
    }
}
