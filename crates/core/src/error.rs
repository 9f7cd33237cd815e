//! Unified error types for the contact service.
//!
//! Error codes:
//! - AUTH_001-002: Authentication errors
//! - VALID_001-003: Validation errors
//! - NOT_FOUND: Missing record
//! - DB_001-002: Persistence errors

use thiserror::Error;

use crate::schema::ValidationFailure;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Authentication error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorCode {
    /// AUTH_001: Bearer token is required
    MissingToken,
    /// AUTH_002: Bearer token is not recognised
    InvalidToken,
}

impl AuthErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingToken => "AUTH_001",
            Self::InvalidToken => "AUTH_002",
        }
    }
}

/// Validation error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorCode {
    /// VALID_001: Invalid JSON / invalid request format
    InvalidFormat,
    /// VALID_002: Record failed schema validation
    InvalidRecord,
    /// VALID_003: Malformed record identifier
    InvalidId,
}

impl ValidationErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidFormat => "VALID_001",
            Self::InvalidRecord => "VALID_002",
            Self::InvalidId => "VALID_003",
        }
    }

    /// Get the HTTP status code.
    pub fn http_status(&self) -> u16 {
        400
    }
}

/// Database error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbErrorCode {
    /// DB_001: Store operation failed
    OperationFailed,
    /// DB_002: Store operation timed out
    Timeout,
}

impl DbErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::OperationFailed => "DB_001",
            Self::Timeout => "DB_002",
        }
    }

    /// Get the HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::OperationFailed => 500,
            Self::Timeout => 504,
        }
    }
}

/// Unified error type for the contact service.
#[derive(Debug, Error)]
pub enum Error {
    /// Record failed schema validation; carries every field problem.
    #[error("[VALID_002] {0}")]
    Validation(ValidationFailure),

    #[error("[VALID_003] invalid id: {0}")]
    InvalidId(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Persistence error with code.
    #[error("[{code}] {message}")]
    Database {
        code: &'static str,
        message: String,
        http_status: u16,
    },

    #[error("[{code}] {message}")]
    Unauthorized { code: &'static str, message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a persistence error.
    pub fn database(code: DbErrorCode, msg: impl Into<String>) -> Self {
        Self::Database {
            code: code.code(),
            message: msg.into(),
            http_status: code.http_status(),
        }
    }

    /// Create an authentication error.
    pub fn unauthorized(code: AuthErrorCode, msg: impl Into<String>) -> Self {
        Self::Unauthorized {
            code: code.code(),
            message: msg.into(),
        }
    }

    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId(id.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Get the HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) => ValidationErrorCode::InvalidRecord.http_status(),
            Self::InvalidId(_) => ValidationErrorCode::InvalidId.http_status(),
            Self::NotFound(_) => 404,
            Self::Database { http_status, .. } => *http_status,
            Self::Unauthorized { .. } => 401,
            Self::Serialization(_) => 400,
        }
    }

    /// Get the error code string.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => ValidationErrorCode::InvalidRecord.code(),
            Self::Serialization(_) => ValidationErrorCode::InvalidFormat.code(),
            Self::InvalidId(_) => ValidationErrorCode::InvalidId.code(),
            Self::NotFound(_) => "NOT_FOUND",
            Self::Database { code, .. } => code,
            Self::Unauthorized { code, .. } => code,
        }
    }

    /// True for failures of the persistence layer (including timeouts).
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Database { .. })
    }
}
