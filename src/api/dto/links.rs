//! DTOs for link creation and listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::CreatedLink;
use crate::domain::entities::LinkSummary;

/// Request body for `POST /api/links`.
///
/// `url` is optional at the type level so that a missing field reaches the
/// service and produces `"url is required"` rather than a decode error.
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Response body for a created link.
#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub short_url: String,
}

impl From<CreatedLink> for CreateLinkResponse {
    fn from(created: CreatedLink) -> Self {
        Self {
            id: created.link.id,
            short_code: created.link.short_code,
            original_url: created.link.original_url,
            created_at: created.link.created_at,
            short_url: created.short_url,
        }
    }
}

/// One entry of `GET /api/links`.
#[derive(Debug, Serialize)]
pub struct LinkListItem {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
    pub last_clicked: Option<DateTime<Utc>>,
}

impl From<LinkSummary> for LinkListItem {
    fn from(summary: LinkSummary) -> Self {
        Self {
            id: summary.link.id,
            short_code: summary.link.short_code,
            original_url: summary.link.original_url,
            created_at: summary.link.created_at,
            click_count: summary.click_count,
            last_clicked: summary.last_clicked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Link;
    use crate::domain::rate_limit::RateLimitInfo;
    use std::time::Duration;

    #[test]
    fn test_create_request_missing_url_deserializes() {
        let req: CreateLinkRequest = serde_json::from_str("{}").unwrap();
        assert!(req.url.is_none());

        let req: CreateLinkRequest = serde_json::from_str(r#"{"url":null}"#).unwrap();
        assert!(req.url.is_none());
    }

    #[test]
    fn test_create_response_shape() {
        let created = CreatedLink {
            link: Link::new(
                1,
                "abc123".to_string(),
                "https://example.com".to_string(),
                Utc::now(),
            ),
            short_url: "http://localhost:3001/abc123".to_string(),
            rate_limit: RateLimitInfo::new(20, 19, Duration::from_secs(900)),
        };

        let json = serde_json::to_value(CreateLinkResponse::from(created)).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();

        assert_eq!(
            keys,
            ["created_at", "id", "original_url", "short_code", "short_url"]
        );
    }

    #[test]
    fn test_list_item_serializes_null_last_clicked() {
        let item = LinkListItem::from(LinkSummary {
            link: Link::new(
                2,
                "xyz789".to_string(),
                "https://example.org".to_string(),
                Utc::now(),
            ),
            click_count: 0,
            last_clicked: None,
        });

        let json = serde_json::to_value(item).unwrap();
        assert_eq!(json["click_count"], 0);
        assert!(json["last_clicked"].is_null());
    }
}
