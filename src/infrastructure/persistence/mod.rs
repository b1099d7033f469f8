//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx prepared
//! statements.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage, lookup and the click aggregate view
//! - [`PgClickRepository`] - Click persistence

pub mod pg_click_repository;
pub mod pg_link_repository;

pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;
