//! Error types for web handlers.
//!
//! Bridges [`LedgerError`] into HTTP responses via Axum's `IntoResponse`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use seating_core::LedgerError;
use serde::Serialize;
use std::fmt;

/// Application error type for web handlers.
///
/// Carries an HTTP status, a user-facing message and a machine-readable
/// code. Serialized as `{"code": ..., "message": ...}`.
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// Error code (for client error handling)
    code: String,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: String) -> Self {
        Self {
            status,
            message,
            code,
        }
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            message.into(),
            "BAD_REQUEST".to_string(),
        )
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(resource: impl fmt::Display, id: impl fmt::Display) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("{resource} with id {id} not found"),
            "NOT_FOUND".to_string(),
        )
    }

    /// Create a 409 Conflict error.
    #[must_use]
    pub fn conflict(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message.into(), code.into())
    }

    /// Create a 422 Unprocessable Entity error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            message.into(),
            "VALIDATION_ERROR".to_string(),
        )
    }

    /// HTTP status this error maps to
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Error code (for client error handling).
    code: String,
    /// Human-readable error message.
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                status = %self.status,
                code = %self.code,
                message = %self.message,
                "Internal server error"
            );
        } else {
            tracing::debug!(
                status = %self.status,
                code = %self.code,
                message = %self.message,
                "Request rejected"
            );
        }

        let body = ErrorResponse {
            code: self.code,
            message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

/// Map ledger rejections onto HTTP semantics.
impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientCapacity { .. } => {
                Self::conflict(err.to_string(), "INSUFFICIENT_CAPACITY")
            }
            LedgerError::InvalidIndex { .. } => Self::new(
                StatusCode::NOT_FOUND,
                err.to_string(),
                "NOT_FOUND".to_string(),
            ),
            LedgerError::NotFound(id) => Self::not_found("Reservation", id),
            LedgerError::InvalidInput(message) => Self::validation(message),
        }
    }
}

/// Malformed request bodies keep axum's status but use the JSON error body.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let status = rejection.status();
        let code = if status == StatusCode::UNPROCESSABLE_ENTITY {
            "VALIDATION_ERROR"
        } else {
            "BAD_REQUEST"
        };
        Self::new(status, rejection.body_text(), code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seating_core::ReservationId;

    #[test]
    fn test_error_display() {
        let err = AppError::bad_request("Invalid reservation id");
        assert_eq!(err.to_string(), "[BAD_REQUEST] Invalid reservation id");
    }

    #[test]
    fn test_insufficient_capacity_is_conflict() {
        let err = AppError::from(LedgerError::InsufficientCapacity {
            requested: 50,
            seats_left: 46,
        });
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.code, "INSUFFICIENT_CAPACITY");
    }

    #[test]
    fn test_not_found() {
        let id = ReservationId::new();
        let err = AppError::from(LedgerError::NotFound(id));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, format!("Reservation with id {id} not found"));
    }

    #[test]
    fn test_invalid_input_is_validation() {
        let err = AppError::from(LedgerError::InvalidInput("name must not be empty".into()));
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(err.message, "name must not be empty");
    }
}
