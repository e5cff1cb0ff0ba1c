use async_trait::async_trait;

use crate::domain::account::principal::Principal;
use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookDraft;
use crate::domain::book::models::BookId;
use crate::domain::book::models::CatalogStats;

/// Port for catalog operations.
#[async_trait]
pub trait BookServicePort: Send + Sync + 'static {
    /// List every book. Public.
    async fn list_books(&self) -> Result<Vec<Book>, BookError>;

    /// Retrieve a book. Public.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_book(&self, id: &BookId) -> Result<Book, BookError>;

    /// Add a book to the catalog. Admin tier.
    ///
    /// # Errors
    /// * `Access(Forbidden)` - Actor is not admin tier
    /// * `DatabaseError` - Database operation failed
    async fn create_book(&self, actor: &Principal, draft: BookDraft) -> Result<Book, BookError>;

    /// Replace every editable field of a book. Admin tier.
    ///
    /// # Errors
    /// * `Access(Forbidden)` - Actor is not admin tier
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn replace_book(
        &self,
        actor: &Principal,
        id: &BookId,
        draft: BookDraft,
    ) -> Result<Book, BookError>;

    /// Delete a book and every order, review, cart line and favorite on it.
    /// Admin tier.
    ///
    /// # Errors
    /// * `Access(Forbidden)` - Actor is not admin tier
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_book(&self, actor: &Principal, id: &BookId) -> Result<(), BookError>;

    /// Approve or reject a book. Superadmin only.
    ///
    /// # Errors
    /// * `Access(Forbidden)` - Actor is not the superadmin
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn set_approval(
        &self,
        actor: &Principal,
        id: &BookId,
        approved: bool,
    ) -> Result<Book, BookError>;

    /// Catalog counters. Admin tier.
    async fn catalog_stats(&self, actor: &Principal) -> Result<CatalogStats, BookError>;
}

/// Persistence operations for books.
#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    /// Persist a new unapproved book.
    async fn create(&self, draft: BookDraft) -> Result<Book, BookError>;

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError>;

    async fn list_all(&self) -> Result<Vec<Book>, BookError>;

    /// Overwrite the editable fields of a book.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn replace(&self, id: &BookId, draft: BookDraft) -> Result<Book, BookError>;

    /// Remove a book. Referencing rows cascade.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &BookId) -> Result<(), BookError>;

    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn set_approval(&self, id: &BookId, approved: bool) -> Result<Book, BookError>;

    async fn stats(&self) -> Result<CatalogStats, BookError>;
}
