//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, LinkSummary, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link storage and retrieval.
///
/// Code uniqueness is enforced by the `links_short_code_key` constraint, so a
/// racing insert of the same code fails with [`AppError::Conflict`] regardless
/// of which server instance issued it.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (short_code, original_url)
            VALUES ($1, $2)
            RETURNING id, short_code, original_url, created_at
            "#,
        )
        .bind(&new_link.short_code)
        .bind(&new_link.original_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, short_code, original_url, created_at
            FROM links
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn list_with_click_counts(&self) -> Result<Vec<LinkSummary>, AppError> {
        let rows = sqlx::query_as::<_, LinkSummary>(
            r#"
            SELECT
                l.id,
                l.short_code,
                l.original_url,
                l.created_at,
                COUNT(c.id) AS click_count,
                MAX(c.clicked_at) AS last_clicked
            FROM links l
            LEFT JOIN clicks c ON c.link_id = l.id
            GROUP BY l.id
            ORDER BY l.created_at DESC, l.id DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
