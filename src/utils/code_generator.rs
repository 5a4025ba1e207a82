//! Short code generation and validation utilities.
//!
//! Codes are drawn uniformly from the 62-character alphanumeric alphabet
//! (`A-Z`, `a-z`, `0-9`), each position independent. User-supplied codes
//! must be 6 to 8 characters from the same alphabet.

use crate::error::AppError;
use rand::{Rng, distr::Alphanumeric};
use serde_json::json;

/// Length of codes produced by the normal generation path.
pub const GENERATED_CODE_LENGTH: usize = 7;

/// Length of the single code produced once every attempt has collided.
pub const FALLBACK_CODE_LENGTH: usize = 8;

/// Number of 7-character candidates tried before widening.
pub const MAX_GENERATION_ATTEMPTS: usize = 6;

pub const MIN_CODE_LENGTH: usize = 6;
pub const MAX_CODE_LENGTH: usize = 8;

/// Message returned when a custom code fails the pattern check.
pub const INVALID_CODE_MESSAGE: &str = "Code must match [A-Za-z0-9]{6,8}";

/// Path segments that belong to routes and are never treated as codes.
pub const RESERVED_SEGMENTS: &[&str] = &["api", "healthz", "favicon.ico"];

/// Generates a random code of `length` alphanumeric characters.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(7);
/// assert_eq!(code.len(), 7);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Returns true if `code` matches `^[A-Za-z0-9]{6,8}$`.
pub fn is_valid_code(code: &str) -> bool {
    (MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&code.len())
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Returns true if `segment` names a route rather than a short code.
pub fn is_reserved_segment(segment: &str) -> bool {
    RESERVED_SEGMENTS.contains(&segment)
}

/// Validates a user-provided custom short code.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the code is not 6-8 ASCII letters
/// or digits.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if !is_valid_code(code) {
        return Err(AppError::bad_request(
            INVALID_CODE_MESSAGE,
            json!({ "code": code }),
        ));
    }

    Ok(())
}
