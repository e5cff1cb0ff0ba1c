use thiserror::Error;

use crate::domain::account::errors::AccessError;
use crate::domain::identifier::IdError;
use crate::domain::quantity::QuantityError;

/// Error for OrderStatus parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderStatusError {
    #[error("Unknown order status: {0}")]
    Unknown(String),
}

/// Top-level error for order operations
#[derive(Debug, Clone, Error)]
pub enum OrderError {
    #[error("Invalid ID: {0}")]
    InvalidId(#[from] IdError),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(#[from] QuantityError),

    #[error("Invalid order status: {0}")]
    InvalidStatus(#[from] OrderStatusError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for OrderError {
    fn from(err: anyhow::Error) -> Self {
        OrderError::Unknown(err.to_string())
    }
}
