//! In-process rate limit counters.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;

use crate::domain::rate_limit::WindowHit;
use crate::domain::repositories::RateLimitStore;
use crate::error::AppError;

/// Expired windows are swept after this many hits.
const SWEEP_EVERY: u64 = 1024;

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u64,
    expires_at: Instant,
}

/// Fixed-window counters held in a [`DashMap`].
///
/// Counts are exact within one process but are not shared between instances,
/// so this store only suits single-instance deployments and tests.
#[derive(Default)]
pub struct MemoryRateLimitStore {
    windows: DashMap<String, Window>,
    hits: AtomicU64,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked keys, expired or not.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Drops every expired window.
    pub fn sweep(&self) {
        let now = Instant::now();
        self.windows.retain(|_, w| w.expires_at > now);
    }
}

#[async_trait]
impl RateLimitStore for MemoryRateLimitStore {
    async fn hit(&self, key: &str, window: Duration) -> Result<WindowHit, AppError> {
        let now = Instant::now();
        let expires_at = now.checked_add(window).ok_or_else(|| {
            AppError::internal(
                "Rate limit window too large",
                serde_json::json!({ "window_secs": window.as_secs() }),
            )
        })?;

        let hit = {
            let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
                count: 0,
                expires_at,
            });

            if entry.expires_at <= now {
                *entry = Window {
                    count: 0,
                    expires_at,
                };
            }

            entry.count += 1;

            WindowHit {
                count: entry.count,
                resets_in: entry.expires_at - now,
            }
        };

        if self.hits.fetch_add(1, Ordering::Relaxed) % SWEEP_EVERY == SWEEP_EVERY - 1 {
            self.sweep();
        }

        Ok(hit)
    }

    async fn reset(&self, key: &str) -> Result<(), AppError> {
        self.windows.remove(key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
