use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::account::errors::AccessError;
use crate::domain::account::principal::Principal;
use crate::domain::book::models::BookId;
use crate::domain::review::errors::ReviewError;
use crate::domain::review::models::CreateReviewCommand;
use crate::domain::review::models::NewReview;
use crate::domain::review::models::Review;
use crate::domain::review::models::ReviewId;
use crate::domain::review::models::UpdateReviewCommand;
use crate::domain::review::ports::ReviewRepository;
use crate::domain::review::ports::ReviewServicePort;

/// Domain service implementation for review operations.
pub struct ReviewService<RR>
where
    RR: ReviewRepository,
{
    repository: Arc<RR>,
}

impl<RR> ReviewService<RR>
where
    RR: ReviewRepository,
{
    pub fn new(repository: Arc<RR>) -> Self {
        Self { repository }
    }

    /// Load a review the actor may modify.
    async fn moderated_review(
        &self,
        actor: &Principal,
        id: &ReviewId,
    ) -> Result<Review, ReviewError> {
        let review = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ReviewError::NotFound(id.to_string()))?;

        actor.require_self_or_admin(&review.user_id).map_err(|_| {
            AccessError::Forbidden("Not authorized to modify this review".to_string())
        })?;

        Ok(review)
    }
}

#[async_trait]
impl<RR> ReviewServicePort for ReviewService<RR>
where
    RR: ReviewRepository,
{
    async fn create_review(
        &self,
        actor: &Principal,
        command: CreateReviewCommand,
    ) -> Result<Review, ReviewError> {
        let user_id = actor.require_user()?;

        let review = self
            .repository
            .create(NewReview {
                user_id,
                book_id: command.book_id,
                rating: command.rating,
                comment: command.comment,
            })
            .await?;

        tracing::info!(review_id = %review.id, book_id = %review.book_id, "Review created");
        Ok(review)
    }

    async fn list_for_book(&self, book_id: &BookId) -> Result<Vec<Review>, ReviewError> {
        self.repository.list_by_book(book_id).await
    }

    async fn update_review(
        &self,
        actor: &Principal,
        id: &ReviewId,
        command: UpdateReviewCommand,
    ) -> Result<Review, ReviewError> {
        let mut review = self.moderated_review(actor, id).await?;

        if let Some(rating) = command.rating {
            review.rating = rating;
        }

        if let Some(comment) = command.comment {
            review.comment = Some(comment);
        }

        self.repository.update(review).await
    }

    async fn delete_review(&self, actor: &Principal, id: &ReviewId) -> Result<(), ReviewError> {
        self.moderated_review(actor, id).await?;
        self.repository.delete(id).await?;

        tracing::info!(review_id = %id, deleted_by = %actor, "Review deleted");
        Ok(())
    }
}
