//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Reports service liveness and store reachability.
///
/// # Endpoint
///
/// `GET /healthz`
///
/// # Response Codes
///
/// - **200 OK**: `{"ok": true, "version": "1.0", "store": "ok"}`
/// - **503 Service Unavailable**: the store did not answer a ping;
///   `ok` is `false` and `store` is `"error"`
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_healthy = state.link_service.is_store_healthy().await;
    let response = HealthResponse::new(store_healthy);

    if store_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
