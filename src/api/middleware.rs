//! API Middleware
//!
//! Bearer-token extraction and request logging.

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::State,
    http::{HeaderMap, Method, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::bearer_token;
use crate::domain::OperationContext;
use crate::error::AppError;

use super::AppState;

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Largest request body the logging middleware will buffer (axum's JSON limit)
const MAX_LOGGED_BODY_BYTES: usize = 2 * 1024 * 1024;

// =========================================================================
// Token extraction
// =========================================================================

/// Resolve an optional bearer token into an `OperationContext`.
///
/// A request without a token proceeds anonymously. A token that is
/// present but invalid, expired, or names a deleted user is rejected.
/// Routes decide for themselves whether anonymity is acceptable.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let mut context = OperationContext::new();
    if let Some(correlation_id) = correlation_id(request.headers()) {
        context = context.with_correlation_id(correlation_id);
    }

    if let Some(token) = bearer_token(request.headers()) {
        let claims = state.tokens.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Bearer token rejected");
            AppError::from(e)
        })?;

        let user = state
            .users
            .find(claims.sub)
            .await?
            .ok_or_else(|| AppError::UserNotFound(claims.sub.to_string()))?;

        context = context.with_request_user(user.id, user.username);
    }

    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}

fn correlation_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
}

// =========================================================================
// Masking
// =========================================================================

/// Headers that should be masked in logs
const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "set-cookie"];

/// JSON body fields that should be masked in logs
const SENSITIVE_FIELDS: &[&str] = &["password", "token"];

/// Mask sensitive headers for logging
pub fn mask_headers_for_logging(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let name_lower = name.as_str().to_lowercase();
            let masked_value = if SENSITIVE_HEADERS.contains(&name_lower.as_str()) {
                "[REDACTED]".to_string()
            } else {
                value.to_str().unwrap_or("[invalid utf8]").to_string()
            };
            (name.to_string(), masked_value)
        })
        .collect()
}

/// Render a request body for logging with sensitive fields masked.
///
/// Non-JSON bodies are summarized by size only.
pub fn mask_body_for_logging(body: &[u8]) -> String {
    if body.is_empty() {
        return "-".to_string();
    }

    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(mut value) => {
            if let Some(object) = value.as_object_mut() {
                for field in SENSITIVE_FIELDS {
                    if let Some(v) = object.get_mut(*field) {
                        *v = serde_json::Value::String("[REDACTED]".to_string());
                    }
                }
            }
            value.to_string()
        }
        Err(_) => format!("[{} bytes, not json]", body.len()),
    }
}

fn logs_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

// =========================================================================
// Request Logging Middleware
// =========================================================================

/// Request logging middleware
///
/// Logs method, uri and masked headers on the way in, and status and
/// duration on the way out. Write requests also log their masked body.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Result<Response, AppError> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let headers = mask_headers_for_logging(request.headers());
    let correlation_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let (request, body) = if logs_body(&method) {
        let (parts, body) = request.into_parts();
        let bytes: Bytes = to_bytes(body, MAX_LOGGED_BODY_BYTES)
            .await
            .map_err(|e| AppError::InvalidRequest(format!("unreadable request body: {}", e)))?;
        let logged = mask_body_for_logging(&bytes);
        (Request::from_parts(parts, Body::from(bytes)), logged)
    } else {
        (request, "-".to_string())
    };

    let start = std::time::Instant::now();

    tracing::info!(
        method = %method,
        uri = %uri,
        correlation_id = ?correlation_id,
        headers = ?headers,
        body = %body,
        "Incoming request"
    );

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %status,
        duration_ms = %duration.as_millis(),
        correlation_id = ?correlation_id,
        "Request completed"
    );

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_headers_for_logging() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", "application/json".parse().unwrap());
        headers.insert("authorization", "Bearer secret.jwt.value".parse().unwrap());
        headers.insert("x-request-id", "req-123".parse().unwrap());

        let masked = mask_headers_for_logging(&headers);

        let auth = masked.iter().find(|(k, _)| k == "authorization");
        let content_type = masked.iter().find(|(k, _)| k == "content-type");
        let request_id = masked.iter().find(|(k, _)| k == "x-request-id");

        assert_eq!(auth.unwrap().1, "[REDACTED]");
        assert_eq!(content_type.unwrap().1, "application/json");
        assert_eq!(request_id.unwrap().1, "req-123");
    }

    #[test]
    fn test_mask_body_hides_password() {
        let body = br#"{"username":"root","name":"Superuser","password":"sekret"}"#;
        let masked = mask_body_for_logging(body);

        assert!(masked.contains("\"username\":\"root\""));
        assert!(masked.contains("[REDACTED]"));
        assert!(!masked.contains("sekret"));
    }

    #[test]
    fn test_mask_body_non_json_and_empty() {
        assert_eq!(mask_body_for_logging(b""), "-");
        assert_eq!(mask_body_for_logging(b"title=x"), "[7 bytes, not json]");
        assert_eq!(mask_body_for_logging(b"[1,2]"), "[1,2]");
    }

    #[test]
    fn test_logs_body_only_for_writes() {
        assert!(logs_body(&Method::POST));
        assert!(logs_body(&Method::PUT));
        assert!(!logs_body(&Method::GET));
        assert!(!logs_body(&Method::DELETE));
    }

    #[test]
    fn test_correlation_id_requires_uuid() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, id.to_string().parse().unwrap());
        assert_eq!(correlation_id(&headers), Some(id));

        headers.insert(REQUEST_ID_HEADER, "not-a-uuid".parse().unwrap());
        assert_eq!(correlation_id(&headers), None);
    }
}
