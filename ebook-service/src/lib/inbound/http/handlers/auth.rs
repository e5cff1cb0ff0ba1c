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
use crate::domain::account::models::Admin;
use crate::domain::account::models::AdminId;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::Session;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::account::principal::Principal;
use crate::domain::account::principal::Role;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    state
        .account_service
        .login(LoginCommand {
            email: body.email,
            password: body.password,
        })
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}

/// Sessions are stateless, so logging out is up to the client discarding its token.
pub async fn logout() -> ApiSuccess<MessageData> {
    ApiSuccess::new(StatusCode::OK, MessageData::new("Successfully logged out"))
}

pub async fn list_admins(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<Vec<AdminData>>, ApiError> {
    state
        .account_service
        .list_admins(&principal)
        .await
        .map_err(ApiError::from)
        .map(|admins| ApiSuccess::new(StatusCode::OK, admins.iter().map(AdminData::from).collect()))
}

pub async fn add_admin(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<AccountRequestBody>,
) -> Result<ApiSuccess<AdminData>, ApiError> {
    state
        .account_service
        .create_admin(&principal, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref admin| ApiSuccess::new(StatusCode::CREATED, admin.into()))
}

pub async fn delete_admin(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(admin_id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let admin_id = AdminId::from_string(&admin_id)?;

    state
        .account_service
        .delete_admin(&principal, &admin_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("Admin deleted successfully")))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: String,
    pub role: String,
    pub redirect_to: String,
    pub expires_at: DateTime<Utc>,
}

impl From<Session> for LoginResponseData {
    fn from(session: Session) -> Self {
        let redirect_to = match session.role {
            Role::Superadmin => "/super-admin-dashboard",
            Role::Admin => "/admins",
            Role::User => "/user-dashboard",
        };

        Self {
            access_token: session.access_token,
            token_type: "bearer".to_string(),
            role: session.role.as_str().to_string(),
            redirect_to: redirect_to.to_string(),
            expires_at: session.expires_at,
        }
    }
}

/// Username, email and password of a new account (raw JSON).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountRequestBody {
    username: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
pub(super) enum ParseAccountRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Password must not be empty")]
    EmptyPassword,
}

impl AccountRequestBody {
    pub(super) fn try_into_command(self) -> Result<CreateAccountCommand, ParseAccountRequestError> {
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        if self.password.is_empty() {
            return Err(ParseAccountRequestError::EmptyPassword);
        }
        Ok(CreateAccountCommand::new(username, email, self.password))
    }
}

impl From<ParseAccountRequestError> for ApiError {
    fn from(err: ParseAccountRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminData {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Admin> for AdminData {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id.0,
            username: admin.username.as_str().to_string(),
            email: admin.email.as_str().to_string(),
            created_at: admin.created_at,
        }
    }
}
