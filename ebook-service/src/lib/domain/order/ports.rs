use async_trait::async_trait;

use crate::domain::account::models::UserId;
use crate::domain::account::principal::Principal;
use crate::domain::order::errors::OrderError;
use crate::domain::order::models::NewOrder;
use crate::domain::order::models::Order;
use crate::domain::order::models::OrderId;
use crate::domain::order::models::OrderStatus;
use crate::domain::order::models::PlaceOrderCommand;

/// Port for order operations.
#[async_trait]
pub trait OrderServicePort: Send + Sync + 'static {
    /// Place an order owned by the calling user.
    ///
    /// # Errors
    /// * `Access(Forbidden)` - Actor is not a user account
    /// * `BookNotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn place_order(
        &self,
        actor: &Principal,
        command: PlaceOrderCommand,
    ) -> Result<Order, OrderError>;

    /// Orders owned by the calling user.
    async fn my_orders(&self, actor: &Principal) -> Result<Vec<Order>, OrderError>;

    /// Cancel one of the calling user's orders.
    ///
    /// # Errors
    /// * `Access(Forbidden)` - Actor is not a user account
    /// * `NotFound` - No such order owned by the caller
    /// * `DatabaseError` - Database operation failed
    async fn cancel_order(&self, actor: &Principal, id: &OrderId) -> Result<Order, OrderError>;

    /// Every order on the platform. Admin tier.
    async fn list_all_orders(&self, actor: &Principal) -> Result<Vec<Order>, OrderError>;
}

/// Persistence operations for orders.
#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    /// Persist a new order.
    ///
    /// # Errors
    /// * `BookNotFound` - Referenced book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, order: NewOrder) -> Result<Order, OrderError>;

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Order>, OrderError>;

    async fn list_all(&self) -> Result<Vec<Order>, OrderError>;

    /// Set the status of an order owned by `owner`.
    ///
    /// # Returns
    /// Updated order, or None when no such order belongs to `owner`
    async fn update_status(
        &self,
        id: &OrderId,
        owner: &UserId,
        status: OrderStatus,
    ) -> Result<Option<Order>, OrderError>;
}
