//! Domain layer containing business entities and logic.
//!
//! Defines entities, repository interfaces and the click pipeline independent
//! of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`rate_limit`] - Window counter and quota value types
//! - [`click_event`] - Click hand-off model
//! - [`click_worker`] - Detached click persistence worker
//!
//! # Click Processing Flow
//!
//! 1. Redirect service resolves the link and hashes the client address
//! 2. [`click_event::ClickEvent`] is pushed to a bounded channel (never awaited)
//! 3. The redirect response is returned
//! 4. [`click_worker::run_click_worker`] persists the event via
//!    [`repositories::ClickRepository`]

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod rate_limit;
pub mod repositories;
