use thiserror::Error;

/// Error for numeric identifier parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid identifier: {0:?}")]
pub struct IdError(pub String);

/// Parse a store-assigned identifier. Identifiers are positive integers.
pub(crate) fn parse_id(s: &str) -> Result<i64, IdError> {
    s.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| IdError(s.to_string()))
}
