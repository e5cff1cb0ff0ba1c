pub mod account;
pub mod book;
pub mod cart;
pub mod favorite;
pub mod identifier;
pub mod order;
pub mod quantity;
pub mod review;
