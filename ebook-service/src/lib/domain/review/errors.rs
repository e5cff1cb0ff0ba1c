use thiserror::Error;

use crate::domain::account::errors::AccessError;
use crate::domain::identifier::IdError;

/// Error for Rating validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RatingError {
    #[error("Rating must be between {min} and {max}, got {actual}")]
    OutOfRange { min: i32, max: i32, actual: i32 },
}

/// Top-level error for review operations
#[derive(Debug, Clone, Error)]
pub enum ReviewError {
    #[error("Invalid ID: {0}")]
    InvalidId(#[from] IdError),

    #[error("Invalid rating: {0}")]
    InvalidRating(#[from] RatingError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Review not found: {0}")]
    NotFound(String),

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for ReviewError {
    fn from(err: anyhow::Error) -> Self {
        ReviewError::Unknown(err.to_string())
    }
}
