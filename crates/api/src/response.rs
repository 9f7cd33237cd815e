//! Standardized API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contact_core::error::ValidationErrorCode;
use contact_core::{FieldError, ValidationFailure};
use serde::{Deserialize, Serialize};
use telemetry::{ComponentHealthReport, HealthStatus};

pub const MSG_DATA_OBTAINED: &str = "Data obtained.";
pub const MSG_CREATED: &str = "ContactUs created";
pub const MSG_UPDATED: &str = "ContactUs updated";
pub const MSG_DELETED: &str = "ContactUs deleted";
pub const MSG_NOT_FOUND: &str = "ContactUs not found";
pub const MSG_INVALID_DATA: &str = "Invalid request data";

/// `{ data, message }` envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
    pub message: String,
}

impl<T> DataResponse<T> {
    pub fn obtained(data: T) -> Self {
        Self {
            data,
            message: MSG_DATA_OBTAINED.to_string(),
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
        }
    }
}

/// `{ data, total, message }` envelope for paginated reads.
#[derive(Debug, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub message: String,
}

impl<T> PageResponse<T> {
    pub fn obtained(data: Vec<T>, total: u64) -> Self {
        Self {
            data,
            total,
            message: MSG_DATA_OBTAINED.to_string(),
        }
    }
}

/// `{ message }` confirmation.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub store_backend: String,
    pub store_connected: bool,
    pub cache_entries: u64,
    pub requests: u64,
    pub components: Vec<ComponentHealthReport>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false; lets clients branch on one field.
    pub status: bool,
    pub message: String,
    pub code: String,
    /// Field-level problems for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
            code: code.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Vec<FieldError>) -> Self {
        self.data = Some(data);
        self
    }
}

/// API error type carrying a status and the JSON error body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ErrorResponse,
}

impl ApiError {
    pub fn with_code(status: StatusCode, code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            status,
            response: ErrorResponse::new(msg, code),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::with_code(
            StatusCode::BAD_REQUEST,
            ValidationErrorCode::InvalidFormat.code(),
            msg,
        )
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::with_code(StatusCode::NOT_FOUND, "NOT_FOUND", msg)
    }

    pub fn validation(failure: ValidationFailure) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            response: ErrorResponse::new(MSG_INVALID_DATA, ValidationErrorCode::InvalidRecord.code())
                .with_data(failure.into_errors()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<contact_core::Error> for ApiError {
    fn from(err: contact_core::Error) -> Self {
        use contact_core::Error;

        let status =
            StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = err.error_code();

        match err {
            Error::Validation(failure) => ApiError::validation(failure),
            Error::NotFound(_) => ApiError::not_found(MSG_NOT_FOUND),
            Error::InvalidId(id) => {
                ApiError::with_code(status, code, format!("Invalid id: {}", id))
            }
            Error::Serialization(e) => ApiError::with_code(status, code, e.to_string()),
            Error::Unauthorized { message, .. } => ApiError::with_code(status, code, message),
            // Store details are logged where they happen; clients get a generic message.
            Error::Database { .. } if status == StatusCode::GATEWAY_TIMEOUT => {
                ApiError::with_code(status, code, "Timed out accessing contact requests")
            }
            Error::Database { .. } => {
                ApiError::with_code(status, code, "Failed to access contact requests")
            }
        }
    }
}
