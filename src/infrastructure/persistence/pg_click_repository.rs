//! PostgreSQL implementation of click repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// PostgreSQL repository for click persistence.
///
/// The `clicks.link_id` foreign key guarantees every click references a link
/// that existed at insertion time.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let click = sqlx::query_as::<_, Click>(
            r#"
            INSERT INTO clicks (link_id, clicked_at, ip_hash, user_agent, referer)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, link_id, clicked_at, ip_hash, user_agent, referer
            "#,
        )
        .bind(new_click.link_id)
        .bind(new_click.clicked_at)
        .bind(&new_click.ip_hash)
        .bind(&new_click.user_agent)
        .bind(&new_click.referer)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(click)
    }
}
