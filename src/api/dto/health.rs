//! DTOs for health check endpoint.

use serde::{Deserialize, Serialize};

/// Version string reported by the health check.
pub const API_VERSION: &str = "1.0";

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub version: String,
    /// `ok` or `error`, from a store round trip.
    pub store: String,
}

impl HealthResponse {
    pub fn new(store_healthy: bool) -> Self {
        Self {
            ok: store_healthy,
            version: API_VERSION.to_string(),
            store: if store_healthy { "ok" } else { "error" }.to_string(),
        }
    }
}
