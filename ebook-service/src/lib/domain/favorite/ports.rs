use async_trait::async_trait;

use crate::domain::account::models::UserId;
use crate::domain::account::principal::Principal;
use crate::domain::book::models::BookId;
use crate::domain::favorite::errors::FavoriteError;
use crate::domain::favorite::models::Favorite;

/// Port for favorite operations. Every operation is scoped to the calling user.
#[async_trait]
pub trait FavoriteServicePort: Send + Sync + 'static {
    /// Bookmark a book.
    ///
    /// # Errors
    /// * `Access(Forbidden)` - Actor is not a user account
    /// * `AlreadyExists` - Book is already a favorite
    /// * `BookNotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn add_favorite(
        &self,
        actor: &Principal,
        book_id: &BookId,
    ) -> Result<Favorite, FavoriteError>;

    async fn list_favorites(&self, actor: &Principal) -> Result<Vec<Favorite>, FavoriteError>;

    /// # Errors
    /// * `NotInFavorites` - Book is not a favorite
    async fn remove_favorite(
        &self,
        actor: &Principal,
        book_id: &BookId,
    ) -> Result<(), FavoriteError>;
}

/// Persistence operations for favorites.
#[async_trait]
pub trait FavoriteRepository: Send + Sync + 'static {
    async fn find(
        &self,
        user_id: &UserId,
        book_id: &BookId,
    ) -> Result<Option<Favorite>, FavoriteError>;

    /// # Errors
    /// * `BookNotFound` - Referenced book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, user_id: &UserId, book_id: &BookId)
        -> Result<Favorite, FavoriteError>;

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Favorite>, FavoriteError>;

    /// # Returns
    /// Whether a favorite was removed
    async fn delete(&self, user_id: &UserId, book_id: &BookId) -> Result<bool, FavoriteError>;
}
