//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation and listing
//! - [`services::redirect_service::RedirectService`] - Code resolution and click capture
//! - [`services::rate_limiter::RateLimiter`] - Shared fixed-window creation limit
//! - [`services::click_recorder::ClickRecorder`] - Non-blocking click queue

pub mod services;
