use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookDraft;
use crate::domain::book::models::BookId;
use crate::domain::book::models::BookTitle;
use crate::domain::book::models::CatalogStats;
use crate::domain::book::models::Price;
use crate::domain::book::ports::BookRepository;

#[derive(Debug, FromRow)]
pub(crate) struct BookRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub price: f64,
    pub is_approved: bool,
}

impl TryFrom<BookRow> for Book {
    type Error = BookError;

    fn try_from(r: BookRow) -> Result<Self, Self::Error> {
        Ok(Book {
            id: BookId(r.id),
            title: BookTitle::new(r.title)?,
            author: r.author,
            description: r.description,
            price: Price::new(r.price)?,
            is_approved: r.is_approved,
        })
    }
}

#[derive(Debug, FromRow)]
struct StatsRow {
    total_books: i64,
    approved_books: i64,
}

pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PostgresBookRepository {
    async fn create(&self, draft: BookDraft) -> Result<Book, BookError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            INSERT INTO books (title, author, description, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, author, description, price, is_approved
            "#,
        )
        .bind(draft.title.as_str())
        .bind(&draft.author)
        .bind(&draft.description)
        .bind(draft.price.value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, author, description, price, is_approved
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        row.map(Book::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Book>, BookError> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, author, description, price, is_approved
            FROM books
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Book::try_from).collect()
    }

    async fn replace(&self, id: &BookId, draft: BookDraft) -> Result<Book, BookError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            UPDATE books
            SET title = $2, author = $3, description = $4, price = $5
            WHERE id = $1
            RETURNING id, title, author, description, price, is_approved
            "#,
        )
        .bind(id.0)
        .bind(draft.title.as_str())
        .bind(&draft.author)
        .bind(&draft.description)
        .bind(draft.price.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        row.map(Book::try_from)
            .transpose()?
            .ok_or(BookError::NotFound(id.to_string()))
    }

    async fn delete(&self, id: &BookId) -> Result<(), BookError> {
        let result = sqlx::query(
            r#"
            DELETE FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(BookError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn set_approval(&self, id: &BookId, approved: bool) -> Result<Book, BookError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            UPDATE books
            SET is_approved = $2
            WHERE id = $1
            RETURNING id, title, author, description, price, is_approved
            "#,
        )
        .bind(id.0)
        .bind(approved)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        row.map(Book::try_from)
            .transpose()?
            .ok_or(BookError::NotFound(id.to_string()))
    }

    async fn stats(&self) -> Result<CatalogStats, BookError> {
        let row = sqlx::query_as::<_, StatsRow>(
            r#"
            SELECT COUNT(*) AS total_books,
                   COUNT(*) FILTER (WHERE is_approved) AS approved_books
            FROM books
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        Ok(CatalogStats {
            total_books: row.total_books,
            approved_books: row.approved_books,
            pending_books: row.total_books - row.approved_books,
        })
    }
}
