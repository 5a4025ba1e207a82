//! Handlers for link management endpoints (create, list, get, delete).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::json;
use tracing::info;
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkResponse, OkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "code": "abc123x"   // optional, 6-8 letters or digits
/// }
/// ```
///
/// Without `code`, a random 7-character code is generated.
///
/// # Response
///
/// **201 Created** with the stored link:
///
/// ```json
/// {
///   "code": "abc123x",
///   "url": "https://example.com",
///   "totalClicks": 0,
///   "createdAt": "2025-01-01T00:00:00Z",
///   "lastClicked": null
/// }
/// ```
///
/// # Errors
///
/// - 400 for a malformed body, missing or invalid `url`, or invalid `code`
/// - 409 if `code` is already taken
/// - 500 on store failure
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let Json(payload) = payload?;

    let Some(url) = payload.url.clone() else {
        return Err(AppError::bad_request("Missing url", json!(null)));
    };
    payload.validate()?;

    let link = state.link_service.create_link(url, payload.code).await?;

    info!(
        code = %link.code,
        short_url = %state.link_service.short_url(&state.base_url, &link.code),
        "Link created"
    );

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Lists all links, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links().await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Returns a single link with its click statistics.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;

    Ok(Json(link.into()))
}

/// Permanently deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// After deletion, both the stats endpoint and the redirect answer 404 for
/// this code.
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<OkResponse>, AppError> {
    state.link_service.delete_link(&code).await?;

    info!(code = %code, "Link deleted");

    Ok(Json(OkResponse::ok()))
}
