//! Cross-origin policy for the browser frontend.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

/// Default origin of the frontend dev server.
pub const DEFAULT_ORIGIN: &str = "http://localhost:5173";

/// Creates a CORS layer allowing `origin` to call the API.
///
/// `*` allows any origin. Methods are limited to GET and POST and the only
/// allowed request header is `Content-Type`.
///
/// An origin that is not a valid header value allows no cross-origin calls.
pub fn layer(origin: &str) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if origin == "*" {
        return base.allow_origin(Any);
    }

    match HeaderValue::from_str(origin) {
        Ok(value) => base.allow_origin(AllowOrigin::exact(value)),
        Err(_) => {
            warn!(origin, "Invalid CORS origin, cross-origin requests disabled");
            base
        }
    }
}
