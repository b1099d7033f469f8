//! Handlers for link creation and listing.

use axum::{
    Json,
    extract::{ConnectInfo, State, rejection::JsonRejection},
    http::HeaderMap,
    response::IntoResponse,
};
use std::net::SocketAddr;

use crate::api::dto::links::{CreateLinkRequest, CreateLinkResponse, LinkListItem};
use crate::error::{AppError, rate_limit_headers};
use crate::state::AppState;
use crate::utils::client_ip::{client_ip, client_key};

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "id": 1,
///   "short_code": "aZ3_x9",
///   "original_url": "https://example.com/some/long/path",
///   "created_at": "2025-01-01T12:00:00Z",
///   "short_url": "http://localhost:3001/aZ3_x9"
/// }
/// ```
///
/// `RateLimit-Limit`, `RateLimit-Remaining` and `RateLimit-Reset` headers are
/// set on success and on 429.
///
/// # Errors
///
/// - 400 `{"error": "url is required"}` / `{"error": "invalid URL"}`, or the
///   decode error for a malformed body
/// - 429 with `Retry-After` when the client exhausted its window
/// - 500 when a backing store fails
pub async fn create_link_handler(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        AppError::bad_request(rejection.body_text(), serde_json::Value::Null)
    })?;

    let key = client_key(client_ip(&headers, Some(peer), state.behind_proxy));

    let created = state
        .link_service
        .create_link(request.url.as_deref(), &key)
        .await?;

    let headers = rate_limit_headers(&created.rate_limit, false);

    Ok((headers, Json(CreateLinkResponse::from(created))))
}

/// Lists every link with its click count and last click time, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkListItem>>, AppError> {
    let links = state.link_service.list_links().await?;

    Ok(Json(links.into_iter().map(LinkListItem::from).collect()))
}
