//! Request extractors.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header, request::Parts},
};
use contact_core::{limits::MAX_BODY_SIZE_BYTES, ContactId};
use serde_json::Value;

use crate::response::ApiError;

/// Untrusted JSON body.
///
/// Malformed or oversized bodies are rejected with the JSON error envelope
/// instead of axum's plain-text rejection.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        if body.len() > MAX_BODY_SIZE_BYTES {
            return Err(ApiError::bad_request(format!(
                "Payload size {}KB exceeds {}KB limit",
                body.len() / 1024,
                MAX_BODY_SIZE_BYTES / 1024
            )));
        }

        if body.is_empty() {
            return Err(ApiError::bad_request("Request body is required"));
        }

        serde_json::from_slice(&body)
            .map(JsonBody)
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e)))
    }
}

/// Record id taken from the `:id` path segment.
#[derive(Debug, Clone, Copy)]
pub struct PathId(pub ContactId);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        raw.parse().map(PathId).map_err(ApiError::from)
    }
}

/// Bearer token from the `Authorization` header, if any.
#[derive(Debug, Clone)]
pub struct BearerToken(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| {
                h.strip_prefix("Bearer ")
                    .or_else(|| h.strip_prefix("bearer "))
            })
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(BearerToken(token))
    }
}
