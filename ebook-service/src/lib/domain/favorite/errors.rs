use thiserror::Error;

use crate::domain::account::errors::AccessError;
use crate::domain::identifier::IdError;

/// Top-level error for favorite operations
#[derive(Debug, Clone, Error)]
pub enum FavoriteError {
    #[error("Invalid ID: {0}")]
    InvalidId(#[from] IdError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Already in favorites: {0}")]
    AlreadyExists(String),

    #[error("Book not found in favorites: {0}")]
    NotInFavorites(String),

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for FavoriteError {
    fn from(err: anyhow::Error) -> Self {
        FavoriteError::Unknown(err.to_string())
    }
}
