use std::fmt;

use crate::domain::account::models::UserId;
use crate::domain::book::models::BookId;

/// A book bookmarked by a user. At most one per (user, book).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub id: FavoriteId,
    pub user_id: UserId,
    pub book_id: BookId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FavoriteId(pub i64);

impl fmt::Display for FavoriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
