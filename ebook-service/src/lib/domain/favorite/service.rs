use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::account::principal::Principal;
use crate::domain::book::models::BookId;
use crate::domain::favorite::errors::FavoriteError;
use crate::domain::favorite::models::Favorite;
use crate::domain::favorite::ports::FavoriteRepository;
use crate::domain::favorite::ports::FavoriteServicePort;

/// Domain service implementation for favorite operations.
///
/// Duplicates are rejected by a lookup before the insert, not by a constraint.
pub struct FavoriteService<FR>
where
    FR: FavoriteRepository,
{
    repository: Arc<FR>,
}

impl<FR> FavoriteService<FR>
where
    FR: FavoriteRepository,
{
    pub fn new(repository: Arc<FR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<FR> FavoriteServicePort for FavoriteService<FR>
where
    FR: FavoriteRepository,
{
    async fn add_favorite(
        &self,
        actor: &Principal,
        book_id: &BookId,
    ) -> Result<Favorite, FavoriteError> {
        let user_id = actor.require_user()?;

        if self.repository.find(&user_id, book_id).await?.is_some() {
            return Err(FavoriteError::AlreadyExists(book_id.to_string()));
        }

        self.repository.insert(&user_id, book_id).await
    }

    async fn list_favorites(&self, actor: &Principal) -> Result<Vec<Favorite>, FavoriteError> {
        let user_id = actor.require_user()?;
        self.repository.list_by_user(&user_id).await
    }

    async fn remove_favorite(
        &self,
        actor: &Principal,
        book_id: &BookId,
    ) -> Result<(), FavoriteError> {
        let user_id = actor.require_user()?;

        if self.repository.delete(&user_id, book_id).await? {
            Ok(())
        } else {
            Err(FavoriteError::NotInFavorites(book_id.to_string()))
        }
    }
}
