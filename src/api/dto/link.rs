//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::domain::entities::Link;
use crate::utils::code_generator::{INVALID_CODE_MESSAGE, is_valid_code};
use crate::utils::url_validator::validate_url;

/// Request body for `POST /api/links`.
///
/// Both fields are optional at the schema level so that a missing URL is
/// reported as `Missing url` rather than a deserialization failure. Only an
/// empty string counts as absent; any other value is kept exactly as sent.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = validate_create_request))]
pub struct CreateLinkRequest {
    /// The destination URL (required, absolute).
    #[serde(default, deserialize_with = "empty_as_none")]
    pub url: Option<String>,

    /// Optional custom short code.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub code: Option<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Checks `url`, then `code`, stopping at the first failure.
fn validate_create_request(request: &CreateLinkRequest) -> Result<(), ValidationError> {
    if let Some(url) = request.url.as_deref() {
        validate_url(url).map_err(|e| field_error("url", e.to_string()))?;
    }

    if let Some(code) = request.code.as_deref()
        && !is_valid_code(code)
    {
        return Err(field_error("code", INVALID_CODE_MESSAGE.to_string()));
    }

    Ok(())
}

fn field_error(field: &'static str, message: String) -> ValidationError {
    ValidationError::new(field).with_message(Cow::Owned(message))
}

/// JSON representation of a stored link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub code: String,
    pub url: String,
    pub total_clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_clicked: Option<DateTime<Utc>>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            code: link.code,
            url: link.url,
            total_clicks: link.total_clicks,
            created_at: link.created_at,
            last_clicked: link.last_clicked,
        }
    }
}

/// Acknowledgement body, e.g. for `DELETE /api/links/{code}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
