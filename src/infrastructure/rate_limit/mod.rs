//! Rate limit counter stores.
//!
//! - [`RedisRateLimitStore`] - counters shared across instances
//! - [`MemoryRateLimitStore`] - single-process counters

pub mod memory_store;
pub mod redis_store;

pub use memory_store::MemoryRateLimitStore;
pub use redis_store::RedisRateLimitStore;
