use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Serialize;

use super::auth::AccountRequestBody;
use super::users::UserData;
use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::account::models::UserId;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::account::principal::Principal;
use crate::domain::book::ports::BookServicePort;
use crate::inbound::http::router::AppState;

/// Create a verified user on behalf of the calling admin.
pub async fn create_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<AccountRequestBody>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .account_service
        .create_user(&principal, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let user_id = UserId::from_string(&user_id)?;

    // Admin tier only, unlike DELETE /api/users/:user_id which also admits the user.
    principal.require_admin()?;

    state
        .account_service
        .delete_user(&principal, &user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("User deleted successfully")))
}

pub async fn promote_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = UserId::from_string(&user_id)?;

    state
        .account_service
        .promote_user(&principal, &user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

pub async fn demote_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = UserId::from_string(&user_id)?;

    state
        .account_service
        .demote_user(&principal, &user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

pub async fn stats(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<StatsData>, ApiError> {
    let total_users = state.account_service.count_users(&principal).await?;
    let catalog = state.book_service.catalog_stats(&principal).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        StatsData {
            total_users,
            total_books: catalog.total_books,
            approved_books: catalog.approved_books,
            pending_books: catalog.pending_books,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsData {
    pub total_users: i64,
    pub total_books: i64,
    pub approved_books: i64,
    pub pending_books: i64,
}
