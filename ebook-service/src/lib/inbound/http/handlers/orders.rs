use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::principal::Principal;
use crate::domain::book::models::BookId;
use crate::domain::order::models::Order;
use crate::domain::order::models::OrderId;
use crate::domain::order::models::PlaceOrderCommand;
use crate::domain::order::ports::OrderServicePort;
use crate::domain::quantity::Quantity;
use crate::inbound::http::router::AppState;

pub async fn place_order(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<PlaceOrderRequest>,
) -> Result<ApiSuccess<OrderData>, ApiError> {
    let command = PlaceOrderCommand {
        book_id: BookId(body.book_id),
        quantity: quantity_or_one(body.quantity)?,
    };

    state
        .order_service
        .place_order(&principal, command)
        .await
        .map_err(ApiError::from)
        .map(|ref order| ApiSuccess::new(StatusCode::CREATED, order.into()))
}

pub async fn my_orders(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<Vec<OrderData>>, ApiError> {
    state
        .order_service
        .my_orders(&principal)
        .await
        .map_err(ApiError::from)
        .map(|orders| ApiSuccess::new(StatusCode::OK, orders.iter().map(OrderData::from).collect()))
}

pub async fn cancel_order(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(order_id): Path<String>,
) -> Result<ApiSuccess<OrderData>, ApiError> {
    let order_id = OrderId::from_string(&order_id)?;

    state
        .order_service
        .cancel_order(&principal, &order_id)
        .await
        .map_err(ApiError::from)
        .map(|ref order| ApiSuccess::new(StatusCode::OK, order.into()))
}

pub async fn list_all_orders(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<Vec<OrderData>>, ApiError> {
    state
        .order_service
        .list_all_orders(&principal)
        .await
        .map_err(ApiError::from)
        .map(|orders| ApiSuccess::new(StatusCode::OK, orders.iter().map(OrderData::from).collect()))
}

/// Quantity from a request body; absent means one copy.
pub(super) fn quantity_or_one(quantity: Option<i32>) -> Result<Quantity, ApiError> {
    quantity
        .map(Quantity::new)
        .transpose()
        .map(Option::unwrap_or_default)
        .map_err(|e| ApiError::UnprocessableEntity(format!("Invalid quantity: {}", e)))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaceOrderRequest {
    book_id: i64,
    #[serde(default)]
    quantity: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderData {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub quantity: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for OrderData {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.0,
            user_id: order.user_id.0,
            book_id: order.book_id.0,
            quantity: order.quantity.value(),
            status: order.status.as_str().to_string(),
            created_at: order.created_at,
        }
    }
}
