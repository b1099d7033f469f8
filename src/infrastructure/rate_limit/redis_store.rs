//! Redis-backed rate limit counters.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, Script, aio::ConnectionManager};
use std::time::Duration;
use tracing::{error, info};

use crate::domain::rate_limit::WindowHit;
use crate::domain::repositories::RateLimitStore;
use crate::error::AppError;

/// Increments the window counter and starts its expiry on the first hit.
///
/// KEYS[1] = counter key, ARGV[1] = window length in milliseconds.
/// Returns `{count, pttl}`.
const HIT_SCRIPT: &str = r#"
local count = redis.call('INCR', KEYS[1])
local ttl = redis.call('PTTL', KEYS[1])
if count == 1 or ttl < 0 then
    redis.call('PEXPIRE', KEYS[1], ARGV[1])
    ttl = tonumber(ARGV[1])
end
return {count, ttl}
"#;

/// Fixed-window counters shared by every server instance.
///
/// The whole increment-and-expire step runs as one Lua script, so concurrent
/// hits from different processes can neither lose counts nor leave a counter
/// without an expiry.
pub struct RedisRateLimitStore {
    conn: ConnectionManager,
    script: Script,
}

impl RedisRateLimitStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the URL is invalid or Redis does not answer.
    pub async fn connect(redis_url: &str) -> Result<Self, AppError> {
        let client = Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        let mut probe = manager.clone();
        probe.ping::<()>().await?;

        info!("✓ Connected to Redis rate limit store");

        Ok(Self::with_manager(manager))
    }

    /// Wraps an existing connection manager.
    pub fn with_manager(conn: ConnectionManager) -> Self {
        Self {
            conn,
            script: Script::new(HIT_SCRIPT),
        }
    }
}

/// Window length in whole milliseconds, at least 1.
fn window_millis(window: Duration) -> Result<u64, AppError> {
    u64::try_from(window.as_millis().max(1)).map_err(|_| {
        AppError::internal(
            "Rate limit window too large",
            serde_json::json!({ "window_secs": window.as_secs() }),
        )
    })
}

#[async_trait]
impl RateLimitStore for RedisRateLimitStore {
    async fn hit(&self, key: &str, window: Duration) -> Result<WindowHit, AppError> {
        let mut conn = self.conn.clone();
        let window_ms = window_millis(window)?;

        let (count, ttl_ms): (u64, i64) = self
            .script
            .key(key)
            .arg(window_ms)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| {
                error!(key, error = %e, "Rate limit script failed");
                AppError::from(e)
            })?;

        let resets_in = if ttl_ms > 0 {
            Duration::from_millis(ttl_ms as u64)
        } else {
            window
        };

        Ok(WindowHit { count, resets_in })
    }

    async fn reset(&self, key: &str) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await?;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }
}
