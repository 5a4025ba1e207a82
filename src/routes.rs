//! Top-level router combining the API, health check and redirect routes.
//!
//! # Route Structure
//!
//! - `GET  /healthz`     - Health check (public)
//! - `/api/links*`       - Link management API (see [`crate::api::routes`])
//! - `GET  /{code}`      - Short link redirect (public)
//!
//! Anything else answers with a JSON 404.
//!
//! # Middleware
//!
//! - **CORS** - Cross-origin access for the admin client
//! - **Tracing** - Structured request/response logging
//!
//! Trailing-slash normalisation wraps the whole router and is applied in
//! [`crate::server::run`].

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{cors, tracing};
use crate::error::AppError;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use serde_json::Value;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `allowed_origin` - single CORS origin, or `None` to allow any origin
pub fn app_router(state: AppState, allowed_origin: Option<&str>) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .route("/{code}", get(redirect_handler))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(cors::layer(allowed_origin))
        .layer(tracing::layer())
}

async fn not_found_handler() -> AppError {
    AppError::not_found("Not found", Value::Null)
}
