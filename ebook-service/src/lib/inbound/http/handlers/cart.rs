use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::books::BookData;
use super::orders::quantity_or_one;
use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::account::principal::Principal;
use crate::domain::book::models::BookId;
use crate::domain::cart::models::AddToCartCommand;
use crate::domain::cart::models::CartItem;
use crate::domain::cart::models::CartLine;
use crate::domain::cart::ports::CartServicePort;
use crate::inbound::http::router::AppState;

pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<AddToCartRequest>,
) -> Result<ApiSuccess<CartItemData>, ApiError> {
    let command = AddToCartCommand {
        book_id: BookId(body.book_id),
        quantity: quantity_or_one(body.quantity)?,
    };

    state
        .cart_service
        .add_to_cart(&principal, command)
        .await
        .map_err(ApiError::from)
        .map(|ref item| ApiSuccess::new(StatusCode::OK, item.into()))
}

pub async fn list_cart(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<Vec<CartLineData>>, ApiError> {
    state
        .cart_service
        .list_cart(&principal)
        .await
        .map_err(ApiError::from)
        .map(|lines| ApiSuccess::new(StatusCode::OK, lines.iter().map(CartLineData::from).collect()))
}

pub async fn remove_from_cart(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(book_id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let book_id = BookId::from_string(&book_id)?;

    state
        .cart_service
        .remove_from_cart(&principal, &book_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("Item removed from cart")))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddToCartRequest {
    book_id: i64,
    #[serde(default)]
    quantity: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemData {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub quantity: i32,
}

impl From<&CartItem> for CartItemData {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.0,
            user_id: item.user_id.0,
            book_id: item.book_id.0,
            quantity: item.quantity.value(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLineData {
    pub id: i64,
    pub book_id: i64,
    pub quantity: i32,
    pub book: BookData,
}

impl From<&CartLine> for CartLineData {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.item.id.0,
            book_id: line.item.book_id.0,
            quantity: line.item.quantity.value(),
            book: (&line.book).into(),
        }
    }
}
