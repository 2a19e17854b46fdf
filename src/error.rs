//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::auth::{PasswordError, TokenError};
use crate::repository::RepositoryError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("malformatted id")]
    MalformedId(String),

    #[error("expected `username` to be unique")]
    DuplicateUsername(String),

    #[error("Token missing or invalid")]
    TokenMissing,

    #[error("token invalid")]
    TokenInvalid,

    #[error("token expired")]
    TokenExpired,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("blog not found")]
    BlogNotFound(String),

    #[error("User not found")]
    UserNotFound(String),

    #[error("unknown endpoint")]
    UnknownEndpoint,

    // Domain errors
    #[error(transparent)]
    Domain(#[from] crate::domain::DomainError),

    // Server errors (5xx)
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateUsername(username) => AppError::DuplicateUsername(username),
            other => AppError::Storage(other.to_string()),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AppError::TokenExpired,
            TokenError::Invalid => AppError::TokenInvalid,
            TokenError::Signing(msg) => AppError::Internal(msg),
        }
    }
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match &self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(msg.clone()))
            }
            AppError::MalformedId(id) => {
                (StatusCode::BAD_REQUEST, "malformatted_id", Some(id.clone()))
            }
            AppError::DuplicateUsername(username) => {
                (StatusCode::BAD_REQUEST, "duplicate_username", Some(username.clone()))
            }

            // 401 Unauthorized
            AppError::TokenMissing => (StatusCode::UNAUTHORIZED, "token_missing", None),
            AppError::TokenInvalid => (StatusCode::UNAUTHORIZED, "token_invalid", None),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "token_expired", None),
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "invalid_credentials", None)
            }

            // 404 Not Found
            AppError::BlogNotFound(id) => {
                (StatusCode::NOT_FOUND, "blog_not_found", Some(id.clone()))
            }
            AppError::UserNotFound(id) => {
                (StatusCode::NOT_FOUND, "user_not_found", Some(id.clone()))
            }
            AppError::UnknownEndpoint => (StatusCode::NOT_FOUND, "unknown_endpoint", None),

            // Domain errors - map to appropriate HTTP status
            AppError::Domain(domain_err) => {
                use crate::domain::DomainError;
                match domain_err {
                    DomainError::Validation(_) => {
                        (StatusCode::BAD_REQUEST, "validation_error", None)
                    }
                    DomainError::Forbidden(msg) => {
                        (StatusCode::FORBIDDEN, "forbidden", Some(msg.clone()))
                    }
                }
            }

            // 500 Internal Server Error
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
            AppError::Config(e) => {
                tracing::error!("Config error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "config_error", None)
            }
        };

        if status.is_client_error() {
            tracing::debug!(status = %status, error_code, "{}", self);
        }

        // Never echo storage or internal details to clients
        let error = if status.is_server_error() {
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error,
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_client_error_statuses() {
        assert_eq!(status_of(AppError::MalformedId("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(AppError::DuplicateUsername("root".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(AppError::TokenMissing), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(AppError::TokenExpired), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(AppError::InvalidCredentials), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(AppError::BlogNotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::UnknownEndpoint), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_domain_error_statuses() {
        assert_eq!(
            status_of(DomainError::Validation("bad".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DomainError::forbidden("not yours").into()),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_repository_error_conversion() {
        let err: AppError = RepositoryError::DuplicateUsername("root".into()).into();
        assert!(matches!(err, AppError::DuplicateUsername(_)));
        assert_eq!(err.to_string(), "expected `username` to be unique");

        let err: AppError = RepositoryError::Corrupt("likes = -1".into()).into();
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_token_error_conversion() {
        assert!(matches!(AppError::from(TokenError::Expired), AppError::TokenExpired));
        assert!(matches!(AppError::from(TokenError::Invalid), AppError::TokenInvalid));
    }
}
