use thiserror::Error;

use crate::domain::account::errors::AccessError;
use crate::domain::identifier::IdError;
use crate::domain::quantity::QuantityError;

/// Top-level error for cart operations
#[derive(Debug, Clone, Error)]
pub enum CartError {
    #[error("Invalid ID: {0}")]
    InvalidId(#[from] IdError),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(#[from] QuantityError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Book not found in cart: {0}")]
    NotInCart(String),

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for CartError {
    fn from(err: anyhow::Error) -> Self {
        CartError::Unknown(err.to_string())
    }
}
