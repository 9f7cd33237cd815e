//! Bearer-token gate in front of the contact routes.
//!
//! Stands in for the upstream authorization service: when tokens are
//! configured, every contact request must present one of them.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use contact_core::error::AuthErrorCode;
use contact_core::Error;
use tracing::warn;

use crate::extractors::BearerToken;
use crate::response::ApiError;
use crate::state::AppState;

/// Rejects requests without a configured bearer token. Open when no tokens
/// are configured.
pub async fn require_bearer(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if state.auth_tokens.is_empty() {
        return Ok(next.run(request).await);
    }

    let Some(token) = token else {
        warn!(path = %request.uri().path(), "Request missing bearer token");
        return Err(Error::unauthorized(AuthErrorCode::MissingToken, "Bearer token is required").into());
    };

    if !state.auth_tokens.contains(&token) {
        warn!(path = %request.uri().path(), "Request with unknown bearer token");
        return Err(Error::unauthorized(AuthErrorCode::InvalidToken, "Invalid bearer token").into());
    }

    Ok(next.run(request).await)
}
