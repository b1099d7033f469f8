//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: database, rate limit store, click queue
//! - `POST /api/links`   - Create a short link (rate limited)
//! - `GET  /api/links`   - List links with click counts
//! - `GET  /{code}`      - Short link redirect
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Frontend origin allow-list
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the router with all routes and middleware, without path
/// normalization.
///
/// Handlers extract `ConnectInfo<SocketAddr>`, so the router must be served
/// with connect info (or have it injected in tests).
pub fn router(state: AppState, cors_origin: &str) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api::routes::routes())
        .with_state(state)
        .layer(cors::layer(cors_origin))
        .layer(tracing::layer())
}

/// Constructs the application router, trimming trailing slashes before
/// routing so `/api/links/` and `/api/links` are the same resource.
pub fn app_router(state: AppState, cors_origin: &str) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, cors_origin))
}
