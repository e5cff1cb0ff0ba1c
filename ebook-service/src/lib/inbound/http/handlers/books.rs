use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::account::principal::Principal;
use crate::domain::book::errors::PriceError;
use crate::domain::book::errors::TitleError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookDraft;
use crate::domain::book::models::BookId;
use crate::domain::book::models::BookTitle;
use crate::domain::book::models::Price;
use crate::domain::book::ports::BookServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_books(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<BookData>>, ApiError> {
    state
        .book_service
        .list_books()
        .await
        .map_err(ApiError::from)
        .map(|books| ApiSuccess::new(StatusCode::OK, books.iter().map(BookData::from).collect()))
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    let book_id = BookId::from_string(&book_id)?;

    state
        .book_service
        .get_book(&book_id)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::OK, book.into()))
}

pub async fn create_book(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<BookRequest>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    state
        .book_service
        .create_book(&principal, body.try_into_draft()?)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::CREATED, book.into()))
}

/// Full replacement of a book's editable fields.
pub async fn replace_book(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(book_id): Path<String>,
    Json(body): Json<BookRequest>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    let book_id = BookId::from_string(&book_id)?;

    state
        .book_service
        .replace_book(&principal, &book_id, body.try_into_draft()?)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::OK, book.into()))
}

pub async fn delete_book(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(book_id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let book_id = BookId::from_string(&book_id)?;

    state
        .book_service
        .delete_book(&principal, &book_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("Book deleted successfully")))
}

pub async fn approve_book(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(book_id): Path<String>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    set_approval(state, principal, book_id, true).await
}

pub async fn reject_book(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(book_id): Path<String>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    set_approval(state, principal, book_id, false).await
}

async fn set_approval(
    state: AppState,
    principal: Principal,
    book_id: String,
    approved: bool,
) -> Result<ApiSuccess<BookData>, ApiError> {
    let book_id = BookId::from_string(&book_id)?;

    state
        .book_service
        .set_approval(&principal, &book_id, approved)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::OK, book.into()))
}

/// HTTP request body for creating or replacing a book (raw JSON)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookRequest {
    title: String,
    author: String,
    #[serde(default)]
    description: Option<String>,
    price: f64,
}

#[derive(Debug, Clone, Error)]
enum ParseBookRequestError {
    #[error("Invalid title: {0}")]
    Title(#[from] TitleError),

    #[error("Invalid price: {0}")]
    Price(#[from] PriceError),

    #[error("Author must not be empty")]
    EmptyAuthor,
}

impl BookRequest {
    fn try_into_draft(self) -> Result<BookDraft, ParseBookRequestError> {
        let title = BookTitle::new(self.title)?;
        let price = Price::new(self.price)?;
        let author = self.author.trim().to_string();
        if author.is_empty() {
            return Err(ParseBookRequestError::EmptyAuthor);
        }
        Ok(BookDraft {
            title,
            author,
            description: self.description,
            price,
        })
    }
}

impl From<ParseBookRequestError> for ApiError {
    fn from(err: ParseBookRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookData {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub price: f64,
    pub is_approved: bool,
}

impl From<&Book> for BookData {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.0,
            title: book.title.as_str().to_string(),
            author: book.author.clone(),
            description: book.description.clone(),
            price: book.price.value(),
            is_approved: book.is_approved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, author: &str, price: f64) -> BookRequest {
        BookRequest {
            title: title.to_string(),
            author: author.to_string(),
            description: None,
            price,
        }
    }

    #[test]
    fn test_book_request_into_draft() {
        let draft = request("Dune", " Frank Herbert ", 9.99)
            .try_into_draft()
            .unwrap();

        assert_eq!(draft.title.as_str(), "Dune");
        assert_eq!(draft.author, "Frank Herbert");
        assert_eq!(draft.price.value(), 9.99);
    }

    #[test]
    fn test_book_request_rejects_invalid_fields() {
        assert!(matches!(
            request("", "Frank Herbert", 9.99).try_into_draft(),
            Err(ParseBookRequestError::Title(_))
        ));
        assert!(matches!(
            request("Dune", "Frank Herbert", -1.0).try_into_draft(),
            Err(ParseBookRequestError::Price(_))
        ));
        assert!(matches!(
            request("Dune", "  ", 9.99).try_into_draft(),
            Err(ParseBookRequestError::EmptyAuthor)
        ));
    }
}
