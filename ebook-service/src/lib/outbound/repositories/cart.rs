use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::account::models::UserId;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::models::CartItem;
use crate::domain::cart::models::CartItemId;
use crate::domain::cart::models::CartLine;
use crate::domain::cart::models::NewCartItem;
use crate::domain::cart::ports::CartRepository;
use crate::domain::quantity::Quantity;
use crate::outbound::repositories::book::BookRow;
use crate::outbound::repositories::is_missing_book;

#[derive(Debug, FromRow)]
struct CartRow {
    id: i64,
    user_id: i64,
    book_id: i64,
    quantity: i32,
}

impl TryFrom<CartRow> for CartItem {
    type Error = CartError;

    fn try_from(r: CartRow) -> Result<Self, Self::Error> {
        Ok(CartItem {
            id: CartItemId(r.id),
            user_id: UserId(r.user_id),
            book_id: BookId(r.book_id),
            quantity: Quantity::new(r.quantity)?,
        })
    }
}

/// Cart item joined with its book.
#[derive(Debug, FromRow)]
struct CartLineRow {
    #[sqlx(flatten)]
    item: CartRow,
    title: String,
    author: String,
    description: Option<String>,
    price: f64,
    is_approved: bool,
}

impl TryFrom<CartLineRow> for CartLine {
    type Error = CartError;

    fn try_from(r: CartLineRow) -> Result<Self, Self::Error> {
        let book = Book::try_from(BookRow {
            id: r.item.book_id,
            title: r.title,
            author: r.author,
            description: r.description,
            price: r.price,
            is_approved: r.is_approved,
        })
        .map_err(|e| CartError::DatabaseError(e.to_string()))?;

        Ok(CartLine {
            item: r.item.try_into()?,
            book,
        })
    }
}

pub struct PostgresCartRepository {
    pool: PgPool,
}

impl PostgresCartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartRepository for PostgresCartRepository {
    async fn find_item(
        &self,
        user_id: &UserId,
        book_id: &BookId,
    ) -> Result<Option<CartItem>, CartError> {
        let row = sqlx::query_as::<_, CartRow>(
            r#"
            SELECT id, user_id, book_id, quantity
            FROM cart
            WHERE user_id = $1 AND book_id = $2
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(user_id.0)
        .bind(book_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CartError::DatabaseError(e.to_string()))?;

        row.map(CartItem::try_from).transpose()
    }

    async fn insert(&self, item: NewCartItem) -> Result<CartItem, CartError> {
        let row = sqlx::query_as::<_, CartRow>(
            r#"
            INSERT INTO cart (user_id, book_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, book_id, quantity
            "#,
        )
        .bind(item.user_id.0)
        .bind(item.book_id.0)
        .bind(item.quantity.value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_missing_book(&e) {
                CartError::BookNotFound(item.book_id.to_string())
            } else {
                CartError::DatabaseError(e.to_string())
            }
        })?;

        row.try_into()
    }

    async fn set_quantity(
        &self,
        id: &CartItemId,
        quantity: Quantity,
    ) -> Result<CartItem, CartError> {
        let row = sqlx::query_as::<_, CartRow>(
            r#"
            UPDATE cart
            SET quantity = $2
            WHERE id = $1
            RETURNING id, user_id, book_id, quantity
            "#,
        )
        .bind(id.0)
        .bind(quantity.value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| CartError::DatabaseError(e.to_string()))?;

        row.try_into()
    }

    async fn list_lines(&self, user_id: &UserId) -> Result<Vec<CartLine>, CartError> {
        let rows = sqlx::query_as::<_, CartLineRow>(
            r#"
            SELECT c.id, c.user_id, c.book_id, c.quantity,
                   b.title, b.author, b.description, b.price, b.is_approved
            FROM cart c
            JOIN books b ON b.id = c.book_id
            WHERE c.user_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CartError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(CartLine::try_from).collect()
    }

    async fn delete_item(&self, user_id: &UserId, book_id: &BookId) -> Result<bool, CartError> {
        let result = sqlx::query(
            r#"
            DELETE FROM cart
            WHERE user_id = $1 AND book_id = $2
            "#,
        )
        .bind(user_id.0)
        .bind(book_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| CartError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
