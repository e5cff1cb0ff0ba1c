use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::account::models::UserId;
use crate::domain::book::models::BookId;
use crate::domain::review::errors::ReviewError;
use crate::domain::review::models::NewReview;
use crate::domain::review::models::Rating;
use crate::domain::review::models::Review;
use crate::domain::review::models::ReviewId;
use crate::domain::review::ports::ReviewRepository;
use crate::outbound::repositories::is_missing_book;

#[derive(Debug, FromRow)]
struct ReviewRow {
    id: i64,
    user_id: i64,
    book_id: i64,
    rating: i32,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = ReviewError;

    fn try_from(r: ReviewRow) -> Result<Self, Self::Error> {
        Ok(Review {
            id: ReviewId(r.id),
            user_id: UserId(r.user_id),
            book_id: BookId(r.book_id),
            rating: Rating::new(r.rating)?,
            comment: r.comment,
            created_at: r.created_at,
        })
    }
}

pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn create(&self, review: NewReview) -> Result<Review, ReviewError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            INSERT INTO reviews (user_id, book_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, book_id, rating, comment, created_at
            "#,
        )
        .bind(review.user_id.0)
        .bind(review.book_id.0)
        .bind(review.rating.value())
        .bind(&review.comment)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_missing_book(&e) {
                ReviewError::BookNotFound(review.book_id.to_string())
            } else {
                ReviewError::DatabaseError(e.to_string())
            }
        })?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, ReviewError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT id, user_id, book_id, rating, comment, created_at
            FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ReviewError::DatabaseError(e.to_string()))?;

        row.map(Review::try_from).transpose()
    }

    async fn list_by_book(&self, book_id: &BookId) -> Result<Vec<Review>, ReviewError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT id, user_id, book_id, rating, comment, created_at
            FROM reviews
            WHERE book_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(book_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ReviewError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Review::try_from).collect()
    }

    async fn update(&self, review: Review) -> Result<Review, ReviewError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            UPDATE reviews
            SET rating = $2, comment = $3
            WHERE id = $1
            RETURNING id, user_id, book_id, rating, comment, created_at
            "#,
        )
        .bind(review.id.0)
        .bind(review.rating.value())
        .bind(&review.comment)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ReviewError::DatabaseError(e.to_string()))?;

        row.map(Review::try_from)
            .transpose()?
            .ok_or(ReviewError::NotFound(review.id.to_string()))
    }

    async fn delete(&self, id: &ReviewId) -> Result<(), ReviewError> {
        let result = sqlx::query(
            r#"
            DELETE FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| ReviewError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ReviewError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
