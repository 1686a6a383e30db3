//! # API Error Type
//!
//! Unified error type for route handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Bookstore API                      │
//! │                                                                         │
//! │  Handler: Result<Json<T>, ApiError>                                     │
//! │         │                                                               │
//! │         ├── ValidationError ─────────────────► 400 VALIDATION_ERROR     │
//! │         ├── InventoryError::Validation ──────► 400 VALIDATION_ERROR     │
//! │         ├── InventoryError::NotFound ────────► 404 NOT_FOUND            │
//! │         ├── InventoryError::InsufficientStock► 409 INSUFFICIENT_STOCK   │
//! │         ├── InventoryError::ExcessiveRelease ► 409 INSUFFICIENT_STOCK   │
//! │         ├── InventoryError::StockOverflow ───► 400 VALIDATION_ERROR     │
//! │         ├── StoreError::NotFound ────────────► 404 NOT_FOUND            │
//! │         └── StoreError::LockPoisoned ────────► 500 INTERNAL             │
//! │                                                                         │
//! │  Body: {"error": "<message>", "code": "<CODE>"}                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bookstore_core::{InventoryError, ValidationError};
use bookstore_store::StoreError;
use serde::Serialize;

/// Error returned from route handlers.
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable error message for display
    #[serde(rename = "error")]
    pub message: String,

    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Reservation or release exceeds stock (409)
    InsufficientStock,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::InsufficientStock => StatusCode::CONFLICT,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            message: message.into(),
            code,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Rejection for a body that is not valid JSON for the endpoint.
    pub fn invalid_body() -> Self {
        ApiError::validation("invalid request body")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts stock ledger errors to API errors.
impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        let code = match &err {
            InventoryError::NotFound { .. } => ErrorCode::NotFound,
            InventoryError::InsufficientStock { .. } | InventoryError::ExcessiveRelease { .. } => {
                ErrorCode::InsufficientStock
            }
            InventoryError::StockOverflow { .. } | InventoryError::Validation(_) => {
                ErrorCode::ValidationError
            }
        };
        ApiError::new(code, err.to_string())
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::not_found("book not found"),
            StoreError::LockPoisoned => {
                tracing::error!("Book store lock poisoned");
                ApiError::internal("internal server error")
            }
        }
    }
}

/// Result type for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;
