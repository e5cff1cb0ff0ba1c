use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::account::principal::Principal;
use crate::domain::order::errors::OrderError;
use crate::domain::order::models::NewOrder;
use crate::domain::order::models::Order;
use crate::domain::order::models::OrderId;
use crate::domain::order::models::OrderStatus;
use crate::domain::order::models::PlaceOrderCommand;
use crate::domain::order::ports::OrderRepository;
use crate::domain::order::ports::OrderServicePort;

/// Domain service implementation for order operations.
pub struct OrderService<OR>
where
    OR: OrderRepository,
{
    repository: Arc<OR>,
}

impl<OR> OrderService<OR>
where
    OR: OrderRepository,
{
    pub fn new(repository: Arc<OR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<OR> OrderServicePort for OrderService<OR>
where
    OR: OrderRepository,
{
    async fn place_order(
        &self,
        actor: &Principal,
        command: PlaceOrderCommand,
    ) -> Result<Order, OrderError> {
        let user_id = actor.require_user()?;

        let order = self
            .repository
            .create(NewOrder {
                user_id,
                book_id: command.book_id,
                quantity: command.quantity,
                status: OrderStatus::Placed,
            })
            .await?;

        tracing::info!(order_id = %order.id, user_id = %user_id, "Order placed");
        Ok(order)
    }

    async fn my_orders(&self, actor: &Principal) -> Result<Vec<Order>, OrderError> {
        let user_id = actor.require_user()?;
        self.repository.list_by_user(&user_id).await
    }

    async fn cancel_order(&self, actor: &Principal, id: &OrderId) -> Result<Order, OrderError> {
        let user_id = actor.require_user()?;

        let order = self
            .repository
            .update_status(id, &user_id, OrderStatus::Cancelled)
            .await?
            .ok_or(OrderError::NotFound(id.to_string()))?;

        tracing::info!(order_id = %id, user_id = %user_id, "Order cancelled");
        Ok(order)
    }

    async fn list_all_orders(&self, actor: &Principal) -> Result<Vec<Order>, OrderError> {
        actor.require_admin()?;
        self.repository.list_all().await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::account::errors::AccessError;
    use crate::domain::account::models::UserId;
    use crate::domain::account::principal::Role;
    use crate::domain::book::models::BookId;
    use crate::domain::quantity::Quantity;

    mock! {
        pub TestOrderRepository {}

        #[async_trait]
        impl OrderRepository for TestOrderRepository {
            async fn create(&self, order: NewOrder) -> Result<Order, OrderError>;
            async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Order>, OrderError>;
            async fn list_all(&self) -> Result<Vec<Order>, OrderError>;
            async fn update_status(
                &self,
                id: &OrderId,
                owner: &UserId,
                status: OrderStatus,
            ) -> Result<Option<Order>, OrderError>;
        }
    }

    fn customer(id: i64) -> Principal {
        Principal::User {
            id: UserId(id),
            email: "alice@example.com".to_string(),
            role: Role::User,
        }
    }

    fn superadmin() -> Principal {
        Principal::Superadmin {
            email: "root@example.com".to_string(),
        }
    }

    fn order(id: i64, user_id: i64, status: OrderStatus) -> Order {
        Order {
            id: OrderId(id),
            user_id: UserId(user_id),
            book_id: BookId(1),
            quantity: Quantity::new(2).unwrap(),
            status,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_place_order_owned_by_caller() {
        let mut repository = MockTestOrderRepository::new();
        repository
            .expect_create()
            .withf(|order| order.user_id == UserId(7) && order.status == OrderStatus::Placed)
            .times(1)
            .returning(|new_order| {
                Ok(Order {
                    id: OrderId(1),
                    user_id: new_order.user_id,
                    book_id: new_order.book_id,
                    quantity: new_order.quantity,
                    status: new_order.status,
                    created_at: Utc::now(),
                })
            });

        let service = OrderService::new(Arc::new(repository));

        let command = PlaceOrderCommand {
            book_id: BookId(1),
            quantity: Quantity::new(2).unwrap(),
        };
        let placed = service.place_order(&customer(7), command).await.unwrap();
        assert_eq!(placed.user_id, UserId(7));
        assert_eq!(placed.status, OrderStatus::Placed);
    }

    #[tokio::test]
    async fn test_place_order_missing_book() {
        let mut repository = MockTestOrderRepository::new();
        repository
            .expect_create()
            .times(1)
            .returning(|order| Err(OrderError::BookNotFound(order.book_id.to_string())));

        let service = OrderService::new(Arc::new(repository));

        let command = PlaceOrderCommand {
            book_id: BookId(99),
            quantity: Quantity::one(),
        };
        assert!(matches!(
            service.place_order(&customer(7), command).await,
            Err(OrderError::BookNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_place_order_requires_user_account() {
        let mut repository = MockTestOrderRepository::new();
        repository.expect_create().times(0);

        let service = OrderService::new(Arc::new(repository));

        let command = PlaceOrderCommand {
            book_id: BookId(1),
            quantity: Quantity::one(),
        };
        assert!(matches!(
            service.place_order(&superadmin(), command).await,
            Err(OrderError::Access(AccessError::Forbidden(_)))
        ));
    }

    #[tokio::test]
    async fn test_cancel_order() {
        let mut repository = MockTestOrderRepository::new();
        repository
            .expect_update_status()
            .withf(|id, owner, status| {
                *id == OrderId(3) && *owner == UserId(7) && *status == OrderStatus::Cancelled
            })
            .times(1)
            .returning(|_, _, status| Ok(Some(order(3, 7, status))));

        let service = OrderService::new(Arc::new(repository));

        let cancelled = service
            .cancel_order(&customer(7), &OrderId(3))
            .await
            .unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_cancel_someone_elses_order_is_not_found() {
        let mut repository = MockTestOrderRepository::new();
        repository
            .expect_update_status()
            .times(1)
            .returning(|_, _, _| Ok(None));

        let service = OrderService::new(Arc::new(repository));

        assert!(matches!(
            service.cancel_order(&customer(8), &OrderId(3)).await,
            Err(OrderError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_all_orders_gate() {
        let mut repository = MockTestOrderRepository::new();
        repository
            .expect_list_all()
            .times(1)
            .returning(|| Ok(vec![order(1, 7, OrderStatus::Placed)]));

        let service = OrderService::new(Arc::new(repository));

        assert!(matches!(
            service.list_all_orders(&customer(7)).await,
            Err(OrderError::Access(AccessError::Forbidden(_)))
        ));
        assert_eq!(service.list_all_orders(&superadmin()).await.unwrap().len(), 1);
    }
}
