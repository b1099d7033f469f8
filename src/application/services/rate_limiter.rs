//! Fixed-window rate limiting over a shared counter store.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::rate_limit::{RateLimitDecision, RateLimitInfo};
use crate::domain::repositories::RateLimitStore;
use crate::error::AppError;

/// Counter key namespace for link creation attempts.
const CREATE_KEY_PREFIX: &str = "rl:create:";

/// Gates link creation: at most `limit` attempts per client within `window`.
///
/// All counting happens in the [`RateLimitStore`]; the limiter keeps no state
/// of its own, so any number of server instances enforce one shared budget.
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    limit: u64,
    window: Duration,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>, limit: u64, window: Duration) -> Self {
        Self {
            store,
            limit,
            window,
        }
    }

    /// Store key for a client.
    pub fn key_for(client_key: &str) -> String {
        format!("{CREATE_KEY_PREFIX}{client_key}")
    }

    /// Counts one attempt for `client_key` and decides whether it may proceed.
    ///
    /// Denied attempts are counted too, so a client hammering the endpoint
    /// stays denied until the window expires.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable. The limiter
    /// fails closed: no attempt is allowed without a successful count.
    pub async fn check(&self, client_key: &str) -> Result<RateLimitDecision, AppError> {
        let key = Self::key_for(client_key);
        let hit = self.store.hit(&key, self.window).await?;

        let info = RateLimitInfo::new(
            self.limit,
            self.limit.saturating_sub(hit.count),
            hit.resets_in,
        );

        if hit.count > self.limit {
            warn!(
                client = %client_key,
                count = hit.count,
                limit = self.limit,
                "Rate limit exceeded"
            );
            metrics::counter!("rate_limit_denied_total").increment(1);
            Ok(RateLimitDecision::Denied(info))
        } else {
            debug!(client = %client_key, count = hit.count, "Rate limit check passed");
            Ok(RateLimitDecision::Allowed(info))
        }
    }

    /// Clears the current window for `client_key`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    pub async fn reset(&self, client_key: &str) -> Result<(), AppError> {
        self.store.reset(&Self::key_for(client_key)).await
    }

    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }
}
