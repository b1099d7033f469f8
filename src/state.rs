//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, RateLimiter, RedirectService};

/// Handles to the application services.
///
/// Cloned per request; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub rate_limiter: Arc<RateLimiter>,
    /// When true, client addresses are read from `X-Forwarded-For` / `X-Real-IP`.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        redirect_service: Arc<RedirectService>,
        rate_limiter: Arc<RateLimiter>,
        behind_proxy: bool,
    ) -> Self {
        Self {
            link_service,
            redirect_service,
            rate_limiter,
            behind_proxy,
        }
    }
}
