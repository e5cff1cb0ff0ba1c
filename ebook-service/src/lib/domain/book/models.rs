use std::fmt;

use crate::domain::book::errors::PriceError;
use crate::domain::book::errors::TitleError;
use crate::domain::identifier::parse_id;
use crate::domain::identifier::IdError;

/// Catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub title: BookTitle,
    pub author: String,
    pub description: Option<String>,
    pub price: Price,
    /// Set by the superadmin; new books start unapproved
    pub is_approved: bool,
}

/// Book unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(pub i64);

impl BookId {
    /// # Errors
    /// * `IdError` - String is not a positive integer
    pub fn from_string(s: &str) -> Result<Self, IdError> {
        parse_id(s).map(BookId)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Book title. Non-blank, at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookTitle(String);

impl BookTitle {
    const MAX_LENGTH: usize = 255;

    pub fn new(title: String) -> Result<Self, TitleError> {
        if title.trim().is_empty() {
            return Err(TitleError::Empty);
        }
        let length = title.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(TitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unit price. Finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() {
            return Err(PriceError::NotFinite);
        }
        if value < 0.0 {
            return Err(PriceError::Negative(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Full set of editable book fields, used for create and replace.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub title: BookTitle,
    pub author: String,
    pub description: Option<String>,
    pub price: Price,
}

/// Catalog counters for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogStats {
    pub total_books: i64,
    pub approved_books: i64,
    pub pending_books: i64,
}
