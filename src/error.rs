//! Application error type and its HTTP mapping.
//!
//! Every failure a handler can produce is an [`AppError`]. The variants map
//! one-to-one onto response status codes:
//!
//! | Variant      | Status | `code` field       |
//! |--------------|--------|--------------------|
//! | `Validation` | 400    | `validation_error` |
//! | `NotFound`   | 404    | `not_found`        |
//! | `Conflict`   | 409    | `conflict`         |
//! | `Internal`   | 500    | `internal_error`   |
//!
//! Store failures are logged here and reach the client only as an opaque
//! `"Server error"` message.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Generic message returned for any internal failure.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message, shown as-is by the admin client.
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status associated with this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its serializable body.
    pub fn to_error_body(&self) -> ErrorBody {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Conflict { message, details } => ("conflict", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorBody {
            error: message.clone(),
            code,
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_error_body())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "Code already exists",
                json!({ "constraint": db.constraint() }),
            );
        }

        tracing::error!(error = %e, "Database error");
        AppError::internal(SERVER_ERROR_MESSAGE, Value::Null)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| {
                    // Struct-level errors carry the offending field in `code`.
                    let name = if field == "__all__" {
                        err.code.to_string()
                    } else {
                        field.to_string()
                    };
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {name}"));
                    (name, message)
                })
            })
            .collect();
        fields.sort();

        let message = fields
            .iter()
            .map(|(_, message)| message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        let details: serde_json::Map<String, Value> = fields
            .into_iter()
            .map(|(field, message)| (field, Value::String(message)))
            .collect();

        AppError::bad_request(message, Value::Object(details))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("x", Value::Null).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("x", Value::Null).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::conflict("x", Value::Null).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::internal("x", Value::Null).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_body_shape() {
        let body = AppError::not_found("Not found", json!({ "code": "zzzzzz" })).to_error_body();
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["error"], "Not found");
        assert_eq!(value["code"], "not_found");
        assert_eq!(value["details"]["code"], "zzzzzz");
    }

    #[test]
    fn test_null_details_are_omitted() {
        let body = AppError::internal(SERVER_ERROR_MESSAGE, Value::Null).to_error_body();
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["error"], "Server error");
        assert!(value.get("details").is_none());
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::conflict("Code already exists", Value::Null);
        assert_eq!(err.to_string(), "Code already exists");
    }

    #[test]
    fn test_non_database_sqlx_error_is_opaque() {
        let err: AppError = sqlx::Error::RowNotFound.into();

        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(err.to_string(), SERVER_ERROR_MESSAGE);
    }
}
