//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;

use crate::application::services::ClientMeta;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look up the code in the link store
/// 2. Queue a click event (hashed client address, user agent, referer)
/// 3. Return 301 Moved Permanently with `Location`
///
/// The click is written by the background worker after the response is sent.
/// A full click queue drops the click, never the redirect.
///
/// # Errors
///
/// Returns 404 with a plain-text `Not found` body for unknown codes.
/// Returns 500 if the link store fails.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    let meta = ClientMeta {
        ip: client_ip(&headers, Some(peer), state.behind_proxy),
        user_agent: header_text(&headers, header::USER_AGENT),
        referer: header_text(&headers, header::REFERER),
    };

    let response = match state.redirect_service.resolve(&code, &meta).await {
        Ok(target) => (
            StatusCode::MOVED_PERMANENTLY,
            [(header::LOCATION, target.url)],
        )
            .into_response(),
        Err(AppError::NotFound { .. }) => (StatusCode::NOT_FOUND, "Not found").into_response(),
        Err(e) => return Err(e),
    };

    Ok(response)
}

fn header_text(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
