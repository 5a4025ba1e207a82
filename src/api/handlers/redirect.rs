//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination and counts the click.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Reserved segments (`api`, `healthz`, `favicon.ico`) and strings that
///    cannot be codes get 404 without touching the store
/// 2. The click is recorded with one atomic increment that also returns
///    the destination
/// 3. Return 302 Found with `Location` set to the stored URL
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
/// Returns 500 on store failure.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.record_click(&code).await?;

    debug!(code = %link.code, total_clicks = link.total_clicks, "Redirecting");

    let location = location_header(&link.url)?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}

/// Builds the `Location` value for a stored URL.
///
/// ASCII URLs are sent verbatim; anything else is re-serialized by the URL
/// parser, which percent-encodes the path and punycodes the host.
fn location_header(url: &str) -> Result<HeaderValue, AppError> {
    if url.is_ascii()
        && let Ok(value) = HeaderValue::from_str(url)
    {
        return Ok(value);
    }

    Url::parse(url)
        .ok()
        .and_then(|parsed| HeaderValue::from_str(parsed.as_str()).ok())
        .ok_or_else(|| {
            tracing::error!(url, "Stored URL cannot be used as a Location header");
            AppError::internal("Server error", json!(null))
        })
}
