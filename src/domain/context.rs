//! Operation Context
//!
//! Contains metadata about the current request for logging and ownership.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for an operation, attached to every API request by middleware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationContext {
    /// User resolved from the bearer token, if one was sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_user_id: Option<Uuid>,

    /// Username from the bearer token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_username: Option<String>,

    /// Correlation ID for request tracing (the `x-request-id` header)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<Uuid>,
}

impl OperationContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self {
            request_user_id: None,
            request_username: None,
            correlation_id: None,
        }
    }

    /// Create context with the authenticated user
    pub fn with_request_user(mut self, user_id: Uuid, username: impl Into<String>) -> Self {
        self.request_user_id = Some(user_id);
        self.request_username = Some(username.into());
        self
    }

    /// Create context with correlation ID
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.request_user_id.is_some()
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::new()
    }
}
