use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::account::principal::Principal;
use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookDraft;
use crate::domain::book::models::BookId;
use crate::domain::book::models::CatalogStats;
use crate::domain::book::ports::BookRepository;
use crate::domain::book::ports::BookServicePort;

/// Domain service implementation for catalog operations.
pub struct BookService<BR>
where
    BR: BookRepository,
{
    repository: Arc<BR>,
}

impl<BR> BookService<BR>
where
    BR: BookRepository,
{
    pub fn new(repository: Arc<BR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<BR> BookServicePort for BookService<BR>
where
    BR: BookRepository,
{
    async fn list_books(&self) -> Result<Vec<Book>, BookError> {
        self.repository.list_all().await
    }

    async fn get_book(&self, id: &BookId) -> Result<Book, BookError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(BookError::NotFound(id.to_string()))
    }

    async fn create_book(&self, actor: &Principal, draft: BookDraft) -> Result<Book, BookError> {
        actor.require_admin()?;
        let book = self.repository.create(draft).await?;

        tracing::info!(book_id = %book.id, created_by = %actor, "Book created");
        Ok(book)
    }

    async fn replace_book(
        &self,
        actor: &Principal,
        id: &BookId,
        draft: BookDraft,
    ) -> Result<Book, BookError> {
        actor.require_admin()?;
        self.repository.replace(id, draft).await
    }

    async fn delete_book(&self, actor: &Principal, id: &BookId) -> Result<(), BookError> {
        actor.require_admin()?;
        self.repository.delete(id).await?;

        tracing::info!(book_id = %id, deleted_by = %actor, "Book deleted");
        Ok(())
    }

    async fn set_approval(
        &self,
        actor: &Principal,
        id: &BookId,
        approved: bool,
    ) -> Result<Book, BookError> {
        actor.require_superadmin()?;
        let book = self.repository.set_approval(id, approved).await?;

        tracing::info!(book_id = %id, approved, "Book approval changed");
        Ok(book)
    }

    async fn catalog_stats(&self, actor: &Principal) -> Result<CatalogStats, BookError> {
        actor.require_admin()?;
        self.repository.stats().await
    }
}
