//! Rate limiting value types shared by the limiter, its stores and the HTTP layer.

use std::time::Duration;

/// Result of one atomic increment against a shared window counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHit {
    /// Number of hits recorded in the current window, including this one.
    pub count: u64,
    /// Time until the store expires the window.
    pub resets_in: Duration,
}

/// Snapshot of a client's quota after a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub limit: u64,
    pub remaining: u64,
    pub reset_after: Duration,
}

impl RateLimitInfo {
    pub fn new(limit: u64, remaining: u64, reset_after: Duration) -> Self {
        Self {
            limit,
            remaining,
            reset_after,
        }
    }

    /// Seconds until the window resets, rounded up so clients never retry early.
    pub fn reset_seconds(&self) -> u64 {
        let secs = self.reset_after.as_secs();
        if self.reset_after.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }

    /// Standard `RateLimit-*` response headers (lowercase names).
    ///
    /// `Retry-After` is included only when `denied` is set.
    pub fn header_pairs(&self, denied: bool) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            ("ratelimit-limit", self.limit.to_string()),
            ("ratelimit-remaining", self.remaining.to_string()),
            ("ratelimit-reset", self.reset_seconds().to_string()),
        ];

        if denied {
            headers.push(("retry-after", self.reset_seconds().to_string()));
        }

        headers
    }
}

/// Outcome of [`crate::application::services::RateLimiter::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed(RateLimitInfo),
    Denied(RateLimitInfo),
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }

    pub fn info(&self) -> &RateLimitInfo {
        match self {
            Self::Allowed(info) | Self::Denied(info) => info,
        }
    }
}
