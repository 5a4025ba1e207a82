//! Cross-origin access for the admin client.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Creates the CORS layer.
///
/// With `allowed_origin` unset, any origin may call the API. With a value,
/// only that origin is allowed; a value that is not a valid header falls
/// back to any origin with a warning.
pub fn layer(allowed_origin: Option<&str>) -> CorsLayer {
    let origin = match allowed_origin {
        None => AllowOrigin::from(Any),
        Some(origin) => match HeaderValue::from_str(origin) {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                tracing::warn!(origin, "Invalid CORS origin, allowing any origin");
                AllowOrigin::from(Any)
            }
        },
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
