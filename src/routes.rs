//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /healthz`  - Health check
//! - `/api/links*`    - Link management API
//! - `GET  /{code}`   - Short link redirect
//!
//! Fixed paths take precedence over `/{code}`, so `healthz` is never handed out as a
//! custom code.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Any origin, no credentials
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Routes and per-route middleware, without path normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api::routes::link_routes())
        .with_state(state)
        .layer(cors::layer())
        .layer(tracing::layer())
}

/// Constructs the application service served by [`crate::server::run`].
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
