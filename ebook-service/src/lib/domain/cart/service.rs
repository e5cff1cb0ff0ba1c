use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::account::principal::Principal;
use crate::domain::book::models::BookId;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::models::AddToCartCommand;
use crate::domain::cart::models::CartItem;
use crate::domain::cart::models::CartLine;
use crate::domain::cart::models::NewCartItem;
use crate::domain::cart::ports::CartRepository;
use crate::domain::cart::ports::CartServicePort;

/// Domain service implementation for cart operations.
///
/// The lookup and the following insert or update are separate statements, so
/// concurrent adds of the same book may race.
pub struct CartService<CR>
where
    CR: CartRepository,
{
    repository: Arc<CR>,
}

impl<CR> CartService<CR>
where
    CR: CartRepository,
{
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<CR> CartServicePort for CartService<CR>
where
    CR: CartRepository,
{
    async fn add_to_cart(
        &self,
        actor: &Principal,
        command: AddToCartCommand,
    ) -> Result<CartItem, CartError> {
        let user_id = actor.require_user()?;

        match self
            .repository
            .find_item(&user_id, &command.book_id)
            .await?
        {
            Some(existing) => {
                let quantity = existing.quantity.checked_add(command.quantity)?;
                self.repository.set_quantity(&existing.id, quantity).await
            }
            None => {
                self.repository
                    .insert(NewCartItem {
                        user_id,
                        book_id: command.book_id,
                        quantity: command.quantity,
                    })
                    .await
            }
        }
    }

    async fn list_cart(&self, actor: &Principal) -> Result<Vec<CartLine>, CartError> {
        let user_id = actor.require_user()?;
        self.repository.list_lines(&user_id).await
    }

    async fn remove_from_cart(
        &self,
        actor: &Principal,
        book_id: &BookId,
    ) -> Result<(), CartError> {
        let user_id = actor.require_user()?;

        if self.repository.delete_item(&user_id, book_id).await? {
            Ok(())
        } else {
            Err(CartError::NotInCart(book_id.to_string()))
        }
    }
}
