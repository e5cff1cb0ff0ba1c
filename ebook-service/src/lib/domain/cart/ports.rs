use async_trait::async_trait;

use crate::domain::account::models::UserId;
use crate::domain::account::principal::Principal;
use crate::domain::book::models::BookId;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::models::AddToCartCommand;
use crate::domain::cart::models::CartItem;
use crate::domain::cart::models::CartItemId;
use crate::domain::cart::models::CartLine;
use crate::domain::cart::models::NewCartItem;
use crate::domain::quantity::Quantity;

/// Port for cart operations. Every operation is scoped to the calling user.
#[async_trait]
pub trait CartServicePort: Send + Sync + 'static {
    /// Add copies of a book. Increases the quantity of an existing item
    /// instead of adding a second one.
    ///
    /// # Errors
    /// * `Access(Forbidden)` - Actor is not a user account
    /// * `BookNotFound` - Book does not exist
    /// * `InvalidQuantity` - Resulting quantity overflows
    /// * `DatabaseError` - Database operation failed
    async fn add_to_cart(
        &self,
        actor: &Principal,
        command: AddToCartCommand,
    ) -> Result<CartItem, CartError>;

    /// Items in the caller's cart with their books.
    async fn list_cart(&self, actor: &Principal) -> Result<Vec<CartLine>, CartError>;

    /// Remove a book from the caller's cart.
    ///
    /// # Errors
    /// * `NotInCart` - The book is not in the cart
    async fn remove_from_cart(&self, actor: &Principal, book_id: &BookId)
        -> Result<(), CartError>;
}

/// Persistence operations for cart items.
#[async_trait]
pub trait CartRepository: Send + Sync + 'static {
    async fn find_item(
        &self,
        user_id: &UserId,
        book_id: &BookId,
    ) -> Result<Option<CartItem>, CartError>;

    /// # Errors
    /// * `BookNotFound` - Referenced book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, item: NewCartItem) -> Result<CartItem, CartError>;

    async fn set_quantity(&self, id: &CartItemId, quantity: Quantity)
        -> Result<CartItem, CartError>;

    async fn list_lines(&self, user_id: &UserId) -> Result<Vec<CartLine>, CartError>;

    /// # Returns
    /// Whether an item was removed
    async fn delete_item(&self, user_id: &UserId, book_id: &BookId) -> Result<bool, CartError>;
}
