use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::account::errors::AccessError;
use crate::domain::account::errors::AccountError;
use crate::domain::book::errors::BookError;
use crate::domain::cart::errors::CartError;
use crate::domain::favorite::errors::FavoriteError;
use crate::domain::identifier::IdError;
use crate::domain::order::errors::OrderError;
use crate::domain::review::errors::ReviewError;

pub mod admin;
pub mod auth;
pub mod books;
pub mod cart;
pub mod favorites;
pub mod orders;
pub mod registration;
pub mod reviews;
pub mod users;
pub mod welcome;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

/// Malformed path identifiers.
impl From<IdError> for ApiError {
    fn from(err: IdError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthorized(msg) => ApiError::Unauthorized(msg),
            AccessError::Forbidden(msg) => ApiError::Forbidden(msg),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Access(e) => e.into(),
            AccountError::UserNotFound(_) | AccountError::AdminNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            AccountError::UsernameAlreadyExists(_) | AccountError::EmailAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            AccountError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AccountError::Unverified => ApiError::Forbidden(err.to_string()),
            AccountError::InvalidId(_) | AccountError::InvalidVerificationToken => {
                ApiError::BadRequest(err.to_string())
            }
            AccountError::InvalidUsername(_) | AccountError::InvalidEmail(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            AccountError::Password(_)
            | AccountError::TokenIssuance(_)
            | AccountError::DatabaseError(_)
            | AccountError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::Access(e) => e.into(),
            BookError::NotFound(_) => ApiError::NotFound(err.to_string()),
            BookError::InvalidId(_) => ApiError::BadRequest(err.to_string()),
            BookError::InvalidTitle(_) | BookError::InvalidPrice(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            BookError::DatabaseError(_) | BookError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Access(e) => e.into(),
            OrderError::NotFound(_) | OrderError::BookNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            OrderError::InvalidId(_) => ApiError::BadRequest(err.to_string()),
            OrderError::InvalidQuantity(_) => ApiError::UnprocessableEntity(err.to_string()),
            OrderError::InvalidStatus(_)
            | OrderError::DatabaseError(_)
            | OrderError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::Access(e) => e.into(),
            ReviewError::NotFound(_) | ReviewError::BookNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            ReviewError::InvalidId(_) => ApiError::BadRequest(err.to_string()),
            ReviewError::InvalidRating(_) => ApiError::UnprocessableEntity(err.to_string()),
            ReviewError::DatabaseError(_) | ReviewError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::Access(e) => e.into(),
            CartError::NotInCart(_) | CartError::BookNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            CartError::InvalidId(_) => ApiError::BadRequest(err.to_string()),
            CartError::InvalidQuantity(_) => ApiError::UnprocessableEntity(err.to_string()),
            CartError::DatabaseError(_) | CartError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<FavoriteError> for ApiError {
    fn from(err: FavoriteError) -> Self {
        match err {
            FavoriteError::Access(e) => e.into(),
            FavoriteError::AlreadyExists(_) => ApiError::Conflict(err.to_string()),
            FavoriteError::NotInFavorites(_) | FavoriteError::BookNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            FavoriteError::InvalidId(_) => ApiError::BadRequest(err.to_string()),
            FavoriteError::DatabaseError(_) | FavoriteError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Body of operations that only report an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: String,
}

impl MessageData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
