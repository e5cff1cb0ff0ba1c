use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use super::auth::AccountRequestBody;
use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::account::models::Registration;
use crate::domain::account::models::VerificationOutcome;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<AccountRequestBody>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|registration| ApiSuccess::new(StatusCode::CREATED, registration.into()))
}

/// Confirm an email address from the link in the verification email.
///
/// A repeat confirmation sends the browser to the login page instead.
pub async fn verify(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let outcome = state.account_service.confirm_verification(&token).await?;

    Ok(match outcome {
        VerificationOutcome::Verified => ApiSuccess::new(
            StatusCode::OK,
            MessageData::new("Email verified successfully"),
        )
        .into_response(),
        VerificationOutcome::AlreadyVerified => {
            let login = format!("{}/login", state.frontend_url.trim_end_matches('/'));
            Redirect::to(&login).into_response()
        }
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub message: String,
    pub token: String,
}

impl From<Registration> for RegisterResponseData {
    fn from(registration: Registration) -> Self {
        Self {
            message: "User registered successfully. Please check your email to verify your account."
                .to_string(),
            token: registration.verification_token,
        }
    }
}
