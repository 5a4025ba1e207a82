//! Destination URL validation.
//!
//! Only syntax is checked: the target must parse as an absolute URL. The
//! string is stored exactly as submitted, and reachability is never probed.

use url::Url;

/// Errors that can occur while validating a destination URL.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Missing url")]
    Missing,

    #[error("Invalid URL")]
    InvalidFormat(String),
}

/// Checks that `input` is a non-empty, well-formed absolute URL.
///
/// # Errors
///
/// Returns [`UrlValidationError::Missing`] for an empty string.
/// Returns [`UrlValidationError::InvalidFormat`] when parsing fails; the
/// payload carries the parser's reason.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_url("https://example.com").is_ok());
/// assert!(validate_url("/relative/path").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    if input.is_empty() {
        return Err(UrlValidationError::Missing);
    }

    Url::parse(input)
        .map(|_| ())
        .map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))
}
