use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;

use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that resolves the bearer token into a `Principal` and adds it
/// to request extensions
///
/// Role gates are left to the services; this only establishes who is calling.
pub async fn authenticate(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or_else(|| {
        tracing::debug!(uri = %req.uri(), "Missing or malformed Authorization header");
        ApiError::Unauthorized("Not authenticated".to_string())
    })?;

    let principal = state
        .account_service
        .authenticate(bearer.token())
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, uri = %req.uri(), "Rejected bearer token");
            ApiError::from(e)
        })?;

    tracing::debug!(principal = %principal, "Request authenticated");
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}
