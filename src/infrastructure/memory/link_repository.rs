use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

use super::MemoryStore;
use crate::domain::entities::{Link, LinkSummary, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// [`LinkRepository`] over a [`MemoryStore`].
pub struct MemoryLinkRepository {
    store: Arc<MemoryStore>,
}

impl MemoryLinkRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        match self.store.links.entry(new_link.short_code.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "short code already exists",
                serde_json::json!({ "short_code": new_link.short_code }),
            )),
            Entry::Vacant(slot) => {
                let link = Link::new(
                    self.store.allocate_link_id(),
                    new_link.short_code,
                    new_link.original_url,
                    Utc::now(),
                );
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.store.links.get(code).map(|l| l.clone()))
    }

    async fn list_with_click_counts(&self) -> Result<Vec<LinkSummary>, AppError> {
        let links: Vec<Link> = self.store.links.iter().map(|l| l.clone()).collect();

        let mut summaries: Vec<LinkSummary> = links
            .into_iter()
            .map(|link| {
                let id = link.id;
                LinkSummary {
                    link,
                    click_count: self.store.click_count(id) as i64,
                    last_clicked: self.store.last_clicked(id),
                }
            })
            .collect();

        summaries.sort_by(|a, b| {
            b.link
                .created_at
                .cmp(&a.link.created_at)
                .then(b.link.id.cmp(&a.link.id))
        });

        Ok(summaries)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewClick;
    use crate::domain::repositories::ClickRepository;
    use crate::infrastructure::memory::MemoryClickRepository;

    fn new_link(code: &str) -> NewLink {
        NewLink {
            short_code: code.to_string(),
            original_url: "https://example.com".to_string(),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_create_same_code_has_one_winner() {
        let repo = Arc::new(MemoryLinkRepository::new(MemoryStore::new()));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let repo = repo.clone();
            handles.push(tokio::spawn(
                async move { repo.create(new_link("same00")).await },
            ));
        }

        let mut created = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(AppError::Conflict { .. }) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e:?}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(conflicts, 15);
        assert_eq!(repo.list_with_click_counts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_code_is_exact() {
        let repo = MemoryLinkRepository::new(MemoryStore::new());
        let link = repo.create(new_link("AbC123")).await.unwrap();

        assert_eq!(repo.find_by_code("AbC123").await.unwrap(), Some(link));
        assert!(repo.find_by_code("abc123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_orders_equal_timestamps_by_id() {
        let store = MemoryStore::new();
        let at = Utc::now();
        for (id, code) in [(1, "first1"), (2, "second"), (3, "third3")] {
            store.links.insert(
                code.to_string(),
                Link::new(id, code.to_string(), "https://example.com".to_string(), at),
            );
        }

        let repo = MemoryLinkRepository::new(store);
        let ids: Vec<i64> = repo
            .list_with_click_counts()
            .await
            .unwrap()
            .iter()
            .map(|s| s.link.id)
            .collect();

        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_list_aggregates_clicks() {
        let store = MemoryStore::new();
        let links = MemoryLinkRepository::new(store.clone());
        let clicks = MemoryClickRepository::new(store.clone());

        let clicked = links.create(new_link("click1")).await.unwrap();
        let quiet = links.create(new_link("quiet1")).await.unwrap();

        let latest = Utc::now();
        for clicked_at in [latest - chrono::Duration::minutes(5), latest] {
            clicks
                .record_click(NewClick {
                    link_id: clicked.id,
                    clicked_at,
                    ip_hash: "hash".to_string(),
                    user_agent: None,
                    referer: None,
                })
                .await
                .unwrap();
        }

        let summaries = links.list_with_click_counts().await.unwrap();
        let find = |id: i64| summaries.iter().find(|s| s.link.id == id).unwrap();

        assert_eq!(find(clicked.id).click_count, 2);
        assert_eq!(find(clicked.id).last_clicked, Some(latest));
        assert_eq!(find(quiet.id).click_count, 0);
        assert!(find(quiet.id).last_clicked.is_none());
    }
}
