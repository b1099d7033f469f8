mod common;

use sqlx::PgPool;
use std::sync::Arc;
use linkmint::domain::repositories::ClickRepository;
use linkmint::error::AppError;
use linkmint::infrastructure::persistence::PgClickRepository;

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_record_click(pool: PgPool) {
    let link_id = common::create_test_link(&pool, "click1", "https://example.com").await;
    let repo = PgClickRepository::new(Arc::new(pool.clone()));

    let new_click = common::new_click(link_id);
    let click = repo.record_click(new_click.clone()).await.unwrap();

    assert_eq!(click.link_id, link_id);
    assert_eq!(click.ip_hash, new_click.ip_hash);
    assert_eq!(click.ip_hash.len(), 64);
    assert_eq!(click.user_agent.as_deref(), Some("Mozilla/5.0"));
    assert!(click.referer.is_none());

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clicks WHERE link_id = $1")
        .bind(link_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, 1);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_record_click_for_missing_link_is_rejected(pool: PgPool) {
    let repo = PgClickRepository::new(Arc::new(pool));

    let result = repo.record_click(common::new_click(999_999)).await;

    assert!(matches!(result, Err(AppError::Validation { .. })));
}
