use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::account::models::UserId;
use crate::domain::book::models::BookId;
use crate::domain::identifier::parse_id;
use crate::domain::identifier::IdError;
use crate::domain::review::errors::RatingError;

/// A user's rating and comment on a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub book_id: BookId,
    pub rating: Rating,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Review unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReviewId(pub i64);

impl ReviewId {
    pub fn from_string(s: &str) -> Result<Self, IdError> {
        parse_id(s).map(ReviewId)
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Star rating from 1 to 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(i32);

impl Rating {
    const MIN: i32 = 1;
    const MAX: i32 = 5;

    /// # Errors
    /// * `OutOfRange` - Value is outside 1..=5
    pub fn new(value: i32) -> Result<Self, RatingError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            })
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReviewCommand {
    pub book_id: BookId,
    pub rating: Rating,
    pub comment: Option<String>,
}

/// Partial review update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReviewCommand {
    pub rating: Option<Rating>,
    pub comment: Option<String>,
}

/// Review row to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub user_id: UserId,
    pub book_id: BookId,
    pub rating: Rating,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(1).is_ok());
        assert!(Rating::new(5).is_ok());
        assert_eq!(
            Rating::new(0),
            Err(RatingError::OutOfRange {
                min: 1,
                max: 5,
                actual: 0
            })
        );
        assert!(Rating::new(6).is_err());
    }
}
