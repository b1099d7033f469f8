//! Shared counter store backing the rate limiter.

use std::time::Duration;

use crate::domain::rate_limit::WindowHit;
use crate::error::AppError;
use async_trait::async_trait;

/// Window counter store visible to every server instance.
///
/// `hit` must be a single atomic increment-with-expiry: concurrent hits on the
/// same key from different processes are all counted, and the window expiry is
/// managed by the store rather than by server-local clocks.
///
/// # Implementations
///
/// - [`crate::infrastructure::rate_limit::RedisRateLimitStore`] - shared Redis counters
/// - [`crate::infrastructure::rate_limit::MemoryRateLimitStore`] - single-process counters
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Increments the counter for `key`, opening a new window of length `window`
    /// when none is active.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    async fn hit(&self, key: &str, window: Duration) -> Result<WindowHit, AppError>;

    /// Drops the current window for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    async fn reset(&self, key: &str) -> Result<(), AppError>;

    /// Returns true if the store answers.
    async fn health_check(&self) -> bool;
}
