//! API route configuration.

use crate::api::handlers::{create_link_handler, list_links_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All `/api` routes.
///
/// # Endpoints
///
/// - `POST /links` - Create a short link (rate limited per client)
/// - `GET  /links` - List links with click counts, newest first
pub fn routes() -> Router<AppState> {
    Router::new().route("/links", get(list_links_handler).post(create_link_handler))
}
