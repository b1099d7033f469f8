use async_trait::async_trait;
use std::sync::Arc;

use super::MemoryStore;
use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// [`ClickRepository`] over a [`MemoryStore`].
pub struct MemoryClickRepository {
    store: Arc<MemoryStore>,
}

impl MemoryClickRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ClickRepository for MemoryClickRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        if !self.store.link_exists(new_click.link_id) {
            return Err(AppError::bad_request(
                "referenced link does not exist",
                serde_json::json!({ "link_id": new_click.link_id }),
            ));
        }

        let click = Click {
            id: self.store.allocate_click_id(),
            link_id: new_click.link_id,
            clicked_at: new_click.clicked_at,
            ip_hash: new_click.ip_hash,
            user_agent: new_click.user_agent,
            referer: new_click.referer,
        };

        self.store
            .clicks
            .entry(click.link_id)
            .or_default()
            .push(click.clone());

        Ok(click)
    }
}
