//! PostgreSQL repository tests.
//!
//! These need a reachable server: `DATABASE_URL=postgres://... cargo test -- --ignored`.
//! `#[sqlx::test]` creates a fresh database per test and applies `migrations/`.

use quicklink::domain::entities::NewLink;
use quicklink::domain::repositories::LinkRepository;
use quicklink::error::AppError;
use quicklink::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(code: &str, url: &str) -> NewLink {
    NewLink {
        code: code.to_string(),
        url: url.to_string(),
    }
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_create_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo
        .create(new_link("test123", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(link.code, "test123");
    assert_eq!(link.url, "https://example.com");
    assert_eq!(link.total_clicks, 0);
    assert!(link.last_clicked.is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_create_duplicate_code_conflicts(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(new_link("dupe123", "https://example.com"))
        .await
        .unwrap();
    let result = repo.create(new_link("dupe123", "https://other.com")).await;

    match result {
        Err(AppError::Conflict { message, .. }) => assert_eq!(message, "Code already exists"),
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_find_by_code(pool: PgPool) {
    sqlx::query("INSERT INTO links (code, url) VALUES ($1, $2)")
        .bind("abc123")
        .bind("https://example.com")
        .execute(&pool)
        .await
        .unwrap();

    let repo = PgLinkRepository::new(Arc::new(pool));

    let found = repo.find_by_code("abc123").await.unwrap();
    assert_eq!(found.unwrap().url, "https://example.com");

    let missing = repo.find_by_code("nothere").await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_list_newest_first(pool: PgPool) {
    for (code, created_at) in [
        ("older01", "2025-01-01T00:00:00Z"),
        ("newer01", "2025-03-01T00:00:00Z"),
        ("middle1", "2025-02-01T00:00:00Z"),
    ] {
        sqlx::query(
            "INSERT INTO links (code, url, created_at) VALUES ($1, 'https://example.com', $2::timestamptz)",
        )
        .bind(code)
        .bind(created_at)
        .execute(&pool)
        .await
        .unwrap();
    }

    let repo = PgLinkRepository::new(Arc::new(pool));

    let codes: Vec<String> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|link| link.code)
        .collect();

    assert_eq!(codes, vec!["newer01", "middle1", "older01"]);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_increment_click(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_link("click01", "https://example.com"))
        .await
        .unwrap();

    let first = repo.increment_click("click01").await.unwrap().unwrap();
    let second = repo.increment_click("click01").await.unwrap().unwrap();

    assert_eq!(first.total_clicks, 1);
    assert_eq!(second.total_clicks, 2);
    assert!(first.last_clicked.is_some());
    assert!(second.last_clicked >= first.last_clicked);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_increment_click_unknown_code(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let result = repo.increment_click("missing1").await.unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_concurrent_increments(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    repo.create(new_link("busy001", "https://example.com"))
        .await
        .unwrap();

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.increment_click("busy001").await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let link = repo.find_by_code("busy001").await.unwrap().unwrap();
    assert_eq!(link.total_clicks, 20);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_delete(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_link("gone123", "https://example.com"))
        .await
        .unwrap();

    repo.delete("gone123").await.unwrap();

    assert!(repo.find_by_code("gone123").await.unwrap().is_none());
    assert!(matches!(
        repo.delete("gone123").await,
        Err(AppError::NotFound { .. })
    ));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_ping(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}
