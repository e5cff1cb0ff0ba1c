use std::fmt;

use crate::domain::account::models::UserId;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::quantity::Quantity;

/// One book in a user's cart. At most one item per (user, book).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub book_id: BookId,
    pub quantity: Quantity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CartItemId(pub i64);

impl fmt::Display for CartItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Cart item together with the book it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item: CartItem,
    pub book: Book,
}

/// Add `quantity` copies of a book to the caller's cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToCartCommand {
    pub book_id: BookId,
    pub quantity: Quantity,
}

/// Cart row to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub user_id: UserId,
    pub book_id: BookId,
    pub quantity: Quantity,
}
