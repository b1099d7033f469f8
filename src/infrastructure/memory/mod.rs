//! In-memory repository implementations.
//!
//! Used by the HTTP integration tests and for running without PostgreSQL.
//! Clicks reference links through a shared [`MemoryStore`], so the click
//! aggregate and the link foreign key behave as they do in the database.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{Click, Link};

mod click_repository;
mod link_repository;

pub use click_repository::MemoryClickRepository;
pub use link_repository::MemoryLinkRepository;

/// Tables shared by the in-memory repositories.
#[derive(Default)]
pub struct MemoryStore {
    links: DashMap<String, Link>,
    clicks: DashMap<i64, Vec<Click>>,
    next_link_id: AtomicI64,
    next_click_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Total clicks recorded for a link.
    pub fn click_count(&self, link_id: i64) -> usize {
        self.clicks.get(&link_id).map(|c| c.len()).unwrap_or(0)
    }

    /// All clicks recorded for a link, oldest first.
    pub fn clicks_for(&self, link_id: i64) -> Vec<Click> {
        self.clicks
            .get(&link_id)
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    fn allocate_link_id(&self) -> i64 {
        self.next_link_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn allocate_click_id(&self) -> i64 {
        self.next_click_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn link_exists(&self, link_id: i64) -> bool {
        self.links.iter().any(|l| l.id == link_id)
    }

    fn last_clicked(&self, link_id: i64) -> Option<DateTime<Utc>> {
        self.clicks
            .get(&link_id)
            .and_then(|c| c.iter().map(|click| click.clicked_at).max())
    }
}
