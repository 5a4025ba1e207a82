//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;

/// State shared across requests.
///
/// The store handle is built once at startup and passed in here, so tests
/// can substitute an in-memory repository.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    /// Public base URL that short links are served under, without a trailing slash.
    pub base_url: Arc<str>,
}

impl AppState {
    pub fn new(link_repository: Arc<dyn LinkRepository>, base_url: &str) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(link_repository)),
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }
}
