//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Credential policy violations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Email must contain '@' and '.'")]
    EmailFormat,

    #[error("Password must be at least 8 characters")]
    PasswordTooShort,

    #[error("Password confirmation does not match")]
    PasswordMismatch,
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Input validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // Account errors
    #[error("Email has already been used")]
    EmailAlreadyUsed,

    #[error("Email is not registered")]
    EmailNotRegistered,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("User not found")]
    UserNotFound,

    // Authentication
    #[error("Authentication required")]
    Unauthorized,

    // External service errors
    #[error("Storage error")]
    Storage(#[from] sea_orm::DbErr),

    #[error("Token signing failed")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(ValidationError::EmailFormat) => "EMAIL_FORMAT",
            AppError::Validation(ValidationError::PasswordTooShort) => "PASSWORD_TOO_SHORT",
            AppError::Validation(ValidationError::PasswordMismatch) => "PASSWORD_MISMATCH",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::EmailAlreadyUsed => "EMAIL_ALREADY_USED",
            AppError::EmailNotRegistered => "EMAIL_NOT_REGISTERED",
            AppError::InvalidPassword => "INVALID_PASSWORD",
            AppError::UserNotFound => "USER_NOT_FOUND",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Signing(_) => "SIGNING_ERROR",
            AppError::Hashing(_) => "HASHING_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::EmailAlreadyUsed => StatusCode::CONFLICT,
            AppError::EmailNotRegistered | AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::InvalidPassword | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Storage(_)
            | AppError::Signing(_)
            | AppError::Hashing(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::BadRequest(msg) => msg.clone(),

            // Hide details for internal/security errors
            AppError::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                "A storage error occurred".to_string()
            }
            AppError::Signing(e) => {
                tracing::error!("Token signing error: {:?}", e);
                "Could not issue a token".to_string()
            }
            AppError::Hashing(msg) => {
                tracing::error!("Password hashing error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_map_to_bad_request() {
        for kind in [
            ValidationError::EmailFormat,
            ValidationError::PasswordTooShort,
            ValidationError::PasswordMismatch,
        ] {
            assert_eq!(AppError::from(kind).status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_account_error_status_codes() {
        assert_eq!(AppError::EmailAlreadyUsed.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::EmailNotRegistered.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::UserNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::InvalidPassword.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AppError::Hashing("argon2 exploded".to_string());
        assert_eq!(err.user_message(), "An internal error occurred");

        let err = AppError::Validation(ValidationError::PasswordMismatch);
        assert_eq!(err.user_message(), "Password confirmation does not match");
    }
}
