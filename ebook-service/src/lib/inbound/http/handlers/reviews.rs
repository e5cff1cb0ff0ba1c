use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::account::principal::Principal;
use crate::domain::book::models::BookId;
use crate::domain::review::errors::RatingError;
use crate::domain::review::models::CreateReviewCommand;
use crate::domain::review::models::Rating;
use crate::domain::review::models::Review;
use crate::domain::review::models::ReviewId;
use crate::domain::review::models::UpdateReviewCommand;
use crate::domain::review::ports::ReviewServicePort;
use crate::inbound::http::router::AppState;

pub async fn create_review(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<CreateReviewRequest>,
) -> Result<ApiSuccess<ReviewData>, ApiError> {
    let command = CreateReviewCommand {
        book_id: BookId(body.book_id),
        rating: Rating::new(body.rating).map_err(invalid_rating)?,
        comment: body.comment,
    };

    state
        .review_service
        .create_review(&principal, command)
        .await
        .map_err(ApiError::from)
        .map(|ref review| ApiSuccess::new(StatusCode::CREATED, review.into()))
}

/// Reviews of the book named by `id`.
pub async fn list_for_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<Vec<ReviewData>>, ApiError> {
    let book_id = BookId::from_string(&id)?;

    state
        .review_service
        .list_for_book(&book_id)
        .await
        .map_err(ApiError::from)
        .map(|reviews| {
            ApiSuccess::new(StatusCode::OK, reviews.iter().map(ReviewData::from).collect())
        })
}

/// Update the review named by `id`.
pub async fn update_review(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(body): Json<UpdateReviewRequest>,
) -> Result<ApiSuccess<ReviewData>, ApiError> {
    let review_id = ReviewId::from_string(&id)?;
    let command = UpdateReviewCommand {
        rating: body
            .rating
            .map(Rating::new)
            .transpose()
            .map_err(invalid_rating)?,
        comment: body.comment,
    };

    state
        .review_service
        .update_review(&principal, &review_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref review| ApiSuccess::new(StatusCode::OK, review.into()))
}

/// Delete the review named by `id`.
pub async fn delete_review(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let review_id = ReviewId::from_string(&id)?;

    state
        .review_service
        .delete_review(&principal, &review_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("Review deleted successfully")))
}

fn invalid_rating(err: RatingError) -> ApiError {
    ApiError::UnprocessableEntity(format!("Invalid rating: {}", err))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateReviewRequest {
    book_id: i64,
    rating: i32,
    #[serde(default)]
    comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateReviewRequest {
    #[serde(default)]
    rating: Option<i32>,
    #[serde(default)]
    comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewData {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Review> for ReviewData {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id.0,
            user_id: review.user_id.0,
            book_id: review.book_id.0,
            rating: review.rating.value(),
            comment: review.comment.clone(),
            created_at: review.created_at,
        }
    }
}
