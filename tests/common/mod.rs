#![allow(dead_code)]

use axum_test::TestServer;
use quicklink::domain::entities::{Link, NewLink};
use quicklink::domain::repositories::LinkRepository;
use quicklink::infrastructure::persistence::InMemoryLinkRepository;
use quicklink::routes::app_router;
use quicklink::state::AppState;
use std::sync::Arc;

pub const BASE_URL: &str = "http://localhost:4000";

pub fn create_test_state() -> (AppState, Arc<InMemoryLinkRepository>) {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let state = AppState::new(repo.clone(), BASE_URL);

    (state, repo)
}

/// Full application router over a fresh in-memory store.
pub fn make_server() -> (TestServer, Arc<InMemoryLinkRepository>) {
    let (state, repo) = create_test_state();
    let server = TestServer::new(app_router(state, None)).unwrap();

    (server, repo)
}

pub async fn create_test_link(repo: &InMemoryLinkRepository, code: &str, url: &str) -> Link {
    repo.create(NewLink {
        code: code.to_string(),
        url: url.to_string(),
    })
    .await
    .unwrap()
}
