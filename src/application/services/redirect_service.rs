//! Short code resolution with non-blocking click capture.

use std::net::IpAddr;
use std::sync::Arc;

use tracing::debug;

use crate::application::services::ClickRecorder;
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::client_ip::hash_ip;

/// Request metadata captured for click analytics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientMeta {
    pub ip: Option<IpAddr>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

/// Where a resolved short code points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub link_id: i64,
    pub url: String,
}

/// Resolves short codes and hands clicks to the [`ClickRecorder`].
///
/// Returning from [`RedirectService::resolve`] never depends on click
/// persistence: the click is queued, not written, before the target is
/// returned.
pub struct RedirectService {
    links: Arc<dyn LinkRepository>,
    clicks: ClickRecorder,
    ip_hash_secret: Option<String>,
}

impl RedirectService {
    pub fn new(
        links: Arc<dyn LinkRepository>,
        clicks: ClickRecorder,
        ip_hash_secret: Option<String>,
    ) -> Self {
        Self {
            links,
            clicks,
            ip_hash_secret,
        }
    }

    /// Looks up `code` and, if it exists, queues a click and returns the target.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] for unknown codes; no click is recorded for them.
    /// - [`AppError::Internal`] if the link store fails.
    pub async fn resolve(&self, code: &str, meta: &ClientMeta) -> Result<RedirectTarget, AppError> {
        let Some(link) = self.links.find_by_code(code).await? else {
            debug!(code, "Unknown short code");
            return Err(AppError::not_found(
                "Not found",
                serde_json::json!({ "code": code }),
            ));
        };

        let ip_hash = hash_ip(meta.ip, self.ip_hash_secret.as_deref());
        self.clicks.record(ClickEvent::new(
            link.id,
            ip_hash,
            meta.user_agent.as_deref(),
            meta.referer.as_deref(),
        ));

        Ok(RedirectTarget {
            link_id: link.id,
            url: link.original_url,
        })
    }

    pub fn click_recorder(&self) -> &ClickRecorder {
        &self.clicks
    }
}
