//! Link entity representing a short code to destination URL mapping.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted short link.
///
/// Links are immutable once created: the store assigns `id` and `created_at`,
/// and `short_code` is unique across all links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        short_code: String,
        original_url: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            short_code,
            original_url,
            created_at,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub short_code: String,
    pub original_url: String,
}

/// Read model joining a link with its click aggregate.
///
/// Computed at read time; `click_count` may lag clicks that are still queued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct LinkSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub link: Link,
    pub click_count: i64,
    pub last_clicked: Option<DateTime<Utc>>,
}
