//! API module
//!
//! HTTP endpoints, middleware and the assembled application router.

pub mod middleware;
pub mod routes;
pub mod state;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::error::AppError;

pub use routes::create_router;
pub use state::AppState;

/// Build the full application: `/health`, the API under `/api`, and a
/// JSON 404 for everything else.
pub fn build_app(state: AppState) -> Router {
    // Axum layers are applied in reverse order (last added = first executed)
    // Order: request id -> trace -> cors -> logging -> auth -> handler
    let api_routes = create_router()
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ))
        .layer(axum_middleware::from_fn(middleware::logging_middleware));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .fallback(unknown_endpoint)
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn unknown_endpoint() -> AppError {
    AppError::UnknownEndpoint
}
