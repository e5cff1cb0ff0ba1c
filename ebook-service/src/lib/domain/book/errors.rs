use thiserror::Error;

use crate::domain::account::errors::AccessError;
use crate::domain::identifier::IdError;

/// Error for BookTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TitleError {
    #[error("Title must not be empty")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Price validation failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PriceError {
    #[error("Price must be a finite number")]
    NotFinite,

    #[error("Price must not be negative, got {0}")]
    Negative(f64),
}

/// Top-level error for catalog operations
#[derive(Debug, Clone, Error)]
pub enum BookError {
    #[error("Invalid book ID: {0}")]
    InvalidId(#[from] IdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TitleError),

    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for BookError {
    fn from(err: anyhow::Error) -> Self {
        BookError::Unknown(err.to_string())
    }
}
