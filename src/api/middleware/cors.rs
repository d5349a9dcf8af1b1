//! Cross-origin resource sharing policy.

use axum::http::{Method, header};
use tower_http::cors::{Any, CorsLayer};

/// Allows any origin to call the JSON API without credentials.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}
