//! Link creation and listing service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::services::RateLimiter;
use crate::domain::entities::{Link, LinkSummary, NewLink};
use crate::domain::rate_limit::{RateLimitDecision, RateLimitInfo};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, is_reserved};
use crate::utils::url_validator::validate_url;

/// A freshly created link together with its public URL and the caller's
/// remaining creation quota.
#[derive(Debug, Clone)]
pub struct CreatedLink {
    pub link: Link,
    pub short_url: String,
    pub rate_limit: RateLimitInfo,
}

/// Service for creating and listing shortened links.
///
/// Creation is validated, then rate limited, then persisted through a bounded
/// generate-and-insert loop. The link store's unique constraint decides
/// collisions; a conflicting insert writes nothing and a fresh code is tried.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    generator: Arc<dyn CodeGenerator>,
    rate_limiter: Arc<RateLimiter>,
    base_url: String,
    max_attempts: usize,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is used to build short URLs; a trailing slash is ignored.
    pub fn new(
        links: Arc<dyn LinkRepository>,
        generator: Arc<dyn CodeGenerator>,
        rate_limiter: Arc<RateLimiter>,
        base_url: impl Into<String>,
        max_attempts: usize,
    ) -> Self {
        Self {
            links,
            generator,
            rate_limiter,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Creates a short link for `raw_url` on behalf of `client_key`.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the URL is missing, unparseable or not http(s).
    ///   Invalid requests do not count against the rate limit.
    /// - [`AppError::RateLimited`] if the client exhausted its window. Nothing is
    ///   generated or stored.
    /// - [`AppError::CodeSpaceExhausted`] if every attempt collided.
    /// - [`AppError::Internal`] on store failures, including an unreachable
    ///   rate limit store.
    pub async fn create_link(
        &self,
        raw_url: Option<&str>,
        client_key: &str,
    ) -> Result<CreatedLink, AppError> {
        let original_url = validate_url(raw_url)
            .map_err(|e| AppError::bad_request(e.to_string(), serde_json::Value::Null))?;

        let rate_limit = match self.rate_limiter.check(client_key).await? {
            RateLimitDecision::Allowed(info) => info,
            RateLimitDecision::Denied(info) => return Err(AppError::RateLimited { info }),
        };

        let link = self.insert_with_fresh_code(original_url).await?;

        info!(
            code = %link.short_code,
            link_id = link.id,
            "Short link created"
        );
        metrics::counter!("links_created_total").increment(1);

        let short_url = self.short_url(&link.short_code);

        Ok(CreatedLink {
            link,
            short_url,
            rate_limit,
        })
    }

    /// All links with their click count and latest click time, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_links(&self) -> Result<Vec<LinkSummary>, AppError> {
        self.links.list_with_click_counts().await
    }

    /// Returns true if the link store answers.
    pub async fn health_check(&self) -> bool {
        self.links.health_check().await
    }

    /// Public URL for a short code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    async fn insert_with_fresh_code(&self, original_url: &str) -> Result<Link, AppError> {
        for attempt in 1..=self.max_attempts {
            let short_code = self.generator.generate();
            if is_reserved(&short_code) {
                warn!(attempt, code = %short_code, "Generated a reserved short code, retrying");
                continue;
            }

            let new_link = NewLink {
                short_code,
                original_url: original_url.to_string(),
            };

            match self.links.create(new_link).await {
                Ok(link) => return Ok(link),
                Err(AppError::Conflict { details, .. }) => {
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        details = %details,
                        "Short code collision, retrying"
                    );
                    metrics::counter!("short_code_collisions_total").increment(1);
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::CodeSpaceExhausted {
            attempts: self.max_attempts,
        })
    }
}
