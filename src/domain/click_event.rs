//! Click event handed from the redirect path to the background worker.

use chrono::{DateTime, Utc};

use crate::domain::entities::NewClick;

/// An in-memory click awaiting persistence.
///
/// Built by the redirect service once the link is resolved, so it already
/// carries the link id and the hashed client address. Sending it through the
/// channel is the only thing the request path does for analytics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub ip_hash: String,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl ClickEvent {
    /// Creates a click event stamped with the current time.
    pub fn new(
        link_id: i64,
        ip_hash: String,
        user_agent: Option<&str>,
        referer: Option<&str>,
    ) -> Self {
        Self {
            link_id,
            clicked_at: Utc::now(),
            ip_hash,
            user_agent: user_agent.map(str::to_string),
            referer: referer.map(str::to_string),
        }
    }
}

impl From<ClickEvent> for NewClick {
    fn from(ev: ClickEvent) -> Self {
        Self {
            link_id: ev.link_id,
            clicked_at: ev.clicked_at,
            ip_hash: ev.ip_hash,
            user_agent: ev.user_agent,
            referer: ev.referer,
        }
    }
}
