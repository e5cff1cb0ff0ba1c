use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::account::models::UserId;
use crate::domain::book::models::BookId;
use crate::domain::favorite::errors::FavoriteError;
use crate::domain::favorite::models::Favorite;
use crate::domain::favorite::models::FavoriteId;
use crate::domain::favorite::ports::FavoriteRepository;
use crate::outbound::repositories::is_missing_book;

#[derive(Debug, FromRow)]
struct FavoriteRow {
    id: i64,
    user_id: i64,
    book_id: i64,
}

impl From<FavoriteRow> for Favorite {
    fn from(r: FavoriteRow) -> Self {
        Favorite {
            id: FavoriteId(r.id),
            user_id: UserId(r.user_id),
            book_id: BookId(r.book_id),
        }
    }
}

pub struct PostgresFavoriteRepository {
    pool: PgPool,
}

impl PostgresFavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepository for PostgresFavoriteRepository {
    async fn find(
        &self,
        user_id: &UserId,
        book_id: &BookId,
    ) -> Result<Option<Favorite>, FavoriteError> {
        let row = sqlx::query_as::<_, FavoriteRow>(
            r#"
            SELECT id, user_id, book_id
            FROM favorites
            WHERE user_id = $1 AND book_id = $2
            LIMIT 1
            "#,
        )
        .bind(user_id.0)
        .bind(book_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| FavoriteError::DatabaseError(e.to_string()))?;

        Ok(row.map(Favorite::from))
    }

    async fn insert(
        &self,
        user_id: &UserId,
        book_id: &BookId,
    ) -> Result<Favorite, FavoriteError> {
        let row = sqlx::query_as::<_, FavoriteRow>(
            r#"
            INSERT INTO favorites (user_id, book_id)
            VALUES ($1, $2)
            RETURNING id, user_id, book_id
            "#,
        )
        .bind(user_id.0)
        .bind(book_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_missing_book(&e) {
                FavoriteError::BookNotFound(book_id.to_string())
            } else {
                FavoriteError::DatabaseError(e.to_string())
            }
        })?;

        Ok(row.into())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Favorite>, FavoriteError> {
        let rows = sqlx::query_as::<_, FavoriteRow>(
            r#"
            SELECT id, user_id, book_id
            FROM favorites
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| FavoriteError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Favorite::from).collect())
    }

    async fn delete(&self, user_id: &UserId, book_id: &BookId) -> Result<bool, FavoriteError> {
        let result = sqlx::query(
            r#"
            DELETE FROM favorites
            WHERE user_id = $1 AND book_id = $2
            "#,
        )
        .bind(user_id.0)
        .bind(book_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| FavoriteError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
