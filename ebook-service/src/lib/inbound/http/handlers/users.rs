use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::UsernameError;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::UpdateUserCommand;
use crate::domain::account::models::User;
use crate::domain::account::models::UserId;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::account::principal::Principal;
use crate::inbound::http::router::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    state
        .account_service
        .list_users(&principal)
        .await
        .map_err(ApiError::from)
        .map(|users| ApiSuccess::new(StatusCode::OK, users.iter().map(UserData::from).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = UserId::from_string(&user_id)?;

    state
        .account_service
        .get_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(user_id): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = UserId::from_string(&user_id)?;

    state
        .account_service
        .update_user(&principal, &user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let user_id = UserId::from_string(&user_id)?;

    state
        .account_service
        .delete_user(&principal, &user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("User deleted successfully")))
}

/// HTTP request body for updating a user (raw JSON, all fields optional)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateUserRequest {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseUpdateUserRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Password must not be empty")]
    EmptyPassword,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, ParseUpdateUserRequestError> {
        let username = self.username.map(Username::new).transpose()?;
        let email = self.email.map(EmailAddress::new).transpose()?;
        if matches!(self.password.as_deref(), Some("")) {
            return Err(ParseUpdateUserRequestError::EmptyPassword);
        }
        Ok(UpdateUserCommand {
            username,
            email,
            password: self.password,
        })
    }
}

impl From<ParseUpdateUserRequestError> for ApiError {
    fn from(err: ParseUpdateUserRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_verified: bool,
    pub is_admin: bool,
    pub admin_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            role: user.role.as_str().to_string(),
            is_verified: user.is_verified,
            is_admin: user.is_admin,
            admin_id: user.created_by.map(|id| id.0),
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_update_keeps_absent_fields_empty() {
        let command = UpdateUserRequest {
            email: Some("new@example.com".to_string()),
            ..Default::default()
        }
        .try_into_command()
        .unwrap();

        assert!(command.username.is_none());
        assert_eq!(command.email.unwrap().as_str(), "new@example.com");
        assert!(command.password.is_none());
    }

    #[test]
    fn test_update_rejects_invalid_fields() {
        let invalid_email = UpdateUserRequest {
            email: Some("nope".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            invalid_email.try_into_command(),
            Err(ParseUpdateUserRequestError::Email(_))
        ));

        let blank_password = UpdateUserRequest {
            password: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            blank_password.try_into_command(),
            Err(ParseUpdateUserRequestError::EmptyPassword)
        ));
    }
}
