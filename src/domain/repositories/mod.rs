//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the backing stores. Concrete implementations live in
//! `crate::infrastructure`; mock implementations are generated via `mockall`
//! for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - short link creation, lookup and listing
//! - [`ClickRepository`] - click persistence
//! - [`RateLimitStore`] - shared window counters for rate limiting

pub mod click_repository;
pub mod link_repository;
pub mod rate_limit_store;

pub use click_repository::ClickRepository;
pub use link_repository::LinkRepository;
pub use rate_limit_store::RateLimitStore;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use rate_limit_store::MockRateLimitStore;
