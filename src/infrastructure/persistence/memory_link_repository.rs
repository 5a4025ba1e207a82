//! In-process implementation of link repository.
//!
//! Backs the HTTP integration tests and any embedding that does not need
//! durability. Records live only as long as the repository value.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Link repository held in a concurrent map keyed by code.
///
/// Per-key operations go through the map's shard locks, so inserting a
/// duplicate code and concurrent click increments behave like the
/// PostgreSQL implementation.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: DashMap<String, Link>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        match self.links.entry(new_link.code.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Code already exists",
                json!({ "code": new_link.code }),
            )),
            Entry::Vacant(slot) => {
                let link = new_link.into_link(Utc::now());
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.get(code).map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self
            .links
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.code.cmp(&b.code))
        });

        Ok(links)
    }

    async fn increment_click(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.get_mut(code).map(|mut entry| {
            entry.record_click(Utc::now());
            entry.value().clone()
        }))
    }

    async fn delete(&self, code: &str) -> Result<(), AppError> {
        self.links
            .remove(code)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Not found", json!({ "code": code })))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_link(code: &str) -> NewLink {
        NewLink {
            code: code.to_string(),
            url: "https://example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryLinkRepository::new();

        let created = repo.create(new_link("abc123x")).await.unwrap();
        assert_eq!(created.total_clicks, 0);
        assert!(created.last_clicked.is_none());

        let found = repo.find_by_code("abc123x").await.unwrap();
        assert_eq!(found, Some(created));
        assert!(repo.find_by_code("zzzzzz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_conflicts() {
        let repo = InMemoryLinkRepository::new();
        repo.create(new_link("abc123x")).await.unwrap();

        let err = repo.create(new_link("abc123x")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = InMemoryLinkRepository::new();
        repo.create(new_link("first1")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        repo.create(new_link("second")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        repo.create(new_link("third3")).await.unwrap();

        let codes: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.code)
            .collect();

        assert_eq!(codes, vec!["third3", "second", "first1"]);
    }

    #[tokio::test]
    async fn test_increment_click() {
        let repo = InMemoryLinkRepository::new();
        repo.create(new_link("abc123")).await.unwrap();

        let first = repo.increment_click("abc123").await.unwrap().unwrap();
        assert_eq!(first.total_clicks, 1);
        let first_at = first.last_clicked.unwrap();

        let second = repo.increment_click("abc123").await.unwrap().unwrap();
        assert_eq!(second.total_clicks, 2);
        assert!(second.last_clicked.unwrap() >= first_at);
    }

    #[tokio::test]
    async fn test_increment_missing_is_noop() {
        let repo = InMemoryLinkRepository::new();

        assert!(repo.increment_click("zzzzzz").await.unwrap().is_none());
        assert!(repo.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_not_lost() {
        let repo = Arc::new(InMemoryLinkRepository::new());
        repo.create(new_link("hot123")).await.unwrap();

        let tasks: Vec<_> = (0..100)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.increment_click("hot123").await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let link = repo.find_by_code("hot123").await.unwrap().unwrap();
        assert_eq!(link.total_clicks, 100);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryLinkRepository::new();
        repo.create(new_link("abc123")).await.unwrap();

        repo.delete("abc123").await.unwrap();
        assert!(repo.find_by_code("abc123").await.unwrap().is_none());

        let err = repo.delete("abc123").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
