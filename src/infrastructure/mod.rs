//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence and rate limit counters.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`rate_limit`] - Redis and in-process rate limit counter stores
//! - [`memory`] - In-memory repositories for tests and database-less runs

pub mod memory;
pub mod persistence;
pub mod rate_limit;
