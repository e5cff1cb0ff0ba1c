use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::account::models::UserId;
use crate::domain::book::models::BookId;
use crate::domain::order::errors::OrderError;
use crate::domain::order::models::NewOrder;
use crate::domain::order::models::Order;
use crate::domain::order::models::OrderId;
use crate::domain::order::models::OrderStatus;
use crate::domain::order::ports::OrderRepository;
use crate::domain::quantity::Quantity;
use crate::outbound::repositories::is_missing_book;

#[derive(Debug, FromRow)]
struct OrderRow {
    id: i64,
    user_id: i64,
    book_id: i64,
    quantity: i32,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = OrderError;

    fn try_from(r: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            id: OrderId(r.id),
            user_id: UserId(r.user_id),
            book_id: BookId(r.book_id),
            quantity: Quantity::new(r.quantity)?,
            status: r.status.parse()?,
            created_at: r.created_at,
        })
    }
}

pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn create(&self, order: NewOrder) -> Result<Order, OrderError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            INSERT INTO orders (user_id, book_id, quantity, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, book_id, quantity, status, created_at
            "#,
        )
        .bind(order.user_id.0)
        .bind(order.book_id.0)
        .bind(order.quantity.value())
        .bind(order.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_missing_book(&e) {
                OrderError::BookNotFound(order.book_id.to_string())
            } else {
                OrderError::DatabaseError(e.to_string())
            }
        })?;

        row.try_into()
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Order>, OrderError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, book_id, quantity, status, created_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn list_all(&self) -> Result<Vec<Order>, OrderError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, book_id, quantity, status, created_at
            FROM orders
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn update_status(
        &self,
        id: &OrderId,
        owner: &UserId,
        status: OrderStatus,
    ) -> Result<Option<Order>, OrderError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            UPDATE orders
            SET status = $3
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, book_id, quantity, status, created_at
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        row.map(Order::try_from).transpose()
    }
}
