use async_trait::async_trait;

use crate::domain::account::principal::Principal;
use crate::domain::book::models::BookId;
use crate::domain::review::errors::ReviewError;
use crate::domain::review::models::CreateReviewCommand;
use crate::domain::review::models::NewReview;
use crate::domain::review::models::Review;
use crate::domain::review::models::ReviewId;
use crate::domain::review::models::UpdateReviewCommand;

/// Port for review operations.
#[async_trait]
pub trait ReviewServicePort: Send + Sync + 'static {
    /// Review a book as the calling user.
    ///
    /// # Errors
    /// * `Access(Forbidden)` - Actor is not a user account
    /// * `BookNotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_review(
        &self,
        actor: &Principal,
        command: CreateReviewCommand,
    ) -> Result<Review, ReviewError>;

    /// Reviews of a book. Public; an unknown book simply has none.
    async fn list_for_book(&self, book_id: &BookId) -> Result<Vec<Review>, ReviewError>;

    /// Partially update a review. Author or admin tier.
    ///
    /// # Errors
    /// * `NotFound` - Review does not exist
    /// * `Access(Forbidden)` - Actor is neither the author nor admin tier
    /// * `DatabaseError` - Database operation failed
    async fn update_review(
        &self,
        actor: &Principal,
        id: &ReviewId,
        command: UpdateReviewCommand,
    ) -> Result<Review, ReviewError>;

    /// Delete a review. Author or admin tier.
    async fn delete_review(&self, actor: &Principal, id: &ReviewId) -> Result<(), ReviewError>;
}

/// Persistence operations for reviews.
#[async_trait]
pub trait ReviewRepository: Send + Sync + 'static {
    /// # Errors
    /// * `BookNotFound` - Referenced book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, review: NewReview) -> Result<Review, ReviewError>;

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, ReviewError>;

    async fn list_by_book(&self, book_id: &BookId) -> Result<Vec<Review>, ReviewError>;

    /// Write rating and comment of an existing review.
    async fn update(&self, review: Review) -> Result<Review, ReviewError>;

    async fn delete(&self, id: &ReviewId) -> Result<(), ReviewError>;
}
