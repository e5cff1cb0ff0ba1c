pub mod admin;
pub mod book;
pub mod cart;
pub mod favorite;
pub mod order;
pub mod review;
pub mod user;

pub use admin::PostgresAdminRepository;
pub use book::PostgresBookRepository;
pub use cart::PostgresCartRepository;
pub use favorite::PostgresFavoriteRepository;
pub use order::PostgresOrderRepository;
pub use review::PostgresReviewRepository;
pub use user::PostgresUserRepository;

/// Integrity violation reported by PostgreSQL, with the constraint name.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Violation<'a> {
    Unique(&'a str),
    ForeignKey(&'a str),
}

pub(crate) fn violation(e: &sqlx::Error) -> Option<Violation<'_>> {
    let db_err = e.as_database_error()?;
    let constraint = db_err.constraint()?;

    if db_err.is_unique_violation() {
        Some(Violation::Unique(constraint))
    } else if db_err.is_foreign_key_violation() {
        Some(Violation::ForeignKey(constraint))
    } else {
        None
    }
}

/// Whether a foreign key violation concerns the `book_id` column.
pub(crate) fn is_missing_book(e: &sqlx::Error) -> bool {
    matches!(violation(e), Some(Violation::ForeignKey(c)) if c.ends_with("book_id_fkey"))
}
