//! Repository trait for short link storage.

use crate::domain::entities::{Link, LinkSummary, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable storage for short code to URL mappings.
///
/// The store is the sole arbiter of short code uniqueness: concurrent creators
/// racing on the same code are resolved by the store's unique constraint, not by
/// any in-process lock, so correctness holds across server instances.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryLinkRepository`] - in-memory fixture
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code already exists. The insert
    /// is atomic: on conflict nothing is written.
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists every link with its click count and last click time,
    /// newest link first.
    ///
    /// Links without clicks report a count of 0 and no last click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_with_click_counts(&self) -> Result<Vec<LinkSummary>, AppError>;

    /// Returns true if the store answers a trivial query.
    async fn health_check(&self) -> bool;
}
