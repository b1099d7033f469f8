//! Click entity representing a single resolved redirect.

use chrono::{DateTime, Utc};

/// A click recorded when a short link is followed.
///
/// Only a one-way hash of the client address is stored, never the address itself.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub ip_hash: String,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

/// Input data for recording a new click.
///
/// `link_id` must reference an existing link; `clicked_at` is taken from the
/// redirect so queueing delay does not skew analytics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClick {
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub ip_hash: String,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}
