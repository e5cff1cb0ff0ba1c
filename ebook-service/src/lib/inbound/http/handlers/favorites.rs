use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::account::principal::Principal;
use crate::domain::book::models::BookId;
use crate::domain::favorite::models::Favorite;
use crate::domain::favorite::ports::FavoriteServicePort;
use crate::inbound::http::router::AppState;

pub async fn add_favorite(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<AddFavoriteRequest>,
) -> Result<ApiSuccess<FavoriteData>, ApiError> {
    state
        .favorite_service
        .add_favorite(&principal, &BookId(body.book_id))
        .await
        .map_err(ApiError::from)
        .map(|ref favorite| ApiSuccess::new(StatusCode::CREATED, favorite.into()))
}

pub async fn list_favorites(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<Vec<FavoriteData>>, ApiError> {
    state
        .favorite_service
        .list_favorites(&principal)
        .await
        .map_err(ApiError::from)
        .map(|favorites| {
            ApiSuccess::new(StatusCode::OK, favorites.iter().map(FavoriteData::from).collect())
        })
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(book_id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let book_id = BookId::from_string(&book_id)?;

    state
        .favorite_service
        .remove_favorite(&principal, &book_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("Removed from favorites")))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddFavoriteRequest {
    book_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteData {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
}

impl From<&Favorite> for FavoriteData {
    fn from(favorite: &Favorite) -> Self {
        Self {
            id: favorite.id.0,
            user_id: favorite.user_id.0,
            book_id: favorite.book_id.0,
        }
    }
}
