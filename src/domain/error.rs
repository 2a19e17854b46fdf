//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

/// Domain-specific errors
///
/// These represent rejected input and business rule violations.
/// They are independent of the web/infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input failed validation (missing field, too short, negative likes)
    #[error("{0}")]
    Validation(String),

    /// Caller is authenticated but may not touch this resource
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl DomainError {
    /// Create a forbidden error
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden(reason.into())
    }

    /// Check if this is a client error (caller's fault)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Forbidden(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message_is_verbatim() {
        let err = DomainError::Validation("Blog validation failed: title: `title` is required".into());

        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "Blog validation failed: title: `title` is required");
    }

    #[test]
    fn test_forbidden_error() {
        let err = DomainError::forbidden("only the creator can delete a blog");

        assert!(err.is_client_error());
        assert!(err.to_string().contains("only the creator"));
    }
}
