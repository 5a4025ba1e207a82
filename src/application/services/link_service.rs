//! Link creation, lookup, deletion and click recording.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{
    FALLBACK_CODE_LENGTH, GENERATED_CODE_LENGTH, MAX_GENERATION_ATTEMPTS, generate_code,
    is_reserved_segment, is_valid_code, validate_custom_code,
};
use crate::utils::url_validator::{UrlValidationError, validate_url};
use serde_json::json;

/// Service for creating, reading and deleting short links and for the
/// redirect flow.
///
/// Generic over the repository so that handlers can run against PostgreSQL,
/// the in-memory store, or a mock.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Creates a short link.
    ///
    /// Checks run in this order, all before the store is touched:
    /// 1. `url` is non-empty
    /// 2. `url` parses as an absolute URL
    /// 3. `custom_code`, when given, matches `[A-Za-z0-9]{6,8}`
    ///
    /// A custom code is then checked for existence; without one, a code is
    /// generated (see [`Self::generate_unique_code`]). The insert itself is
    /// the final uniqueness check, so a concurrent request that wins the race
    /// makes this one fail with a conflict.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a missing or malformed URL or a
    /// malformed code.
    /// Returns [`AppError::Conflict`] if the code already exists.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create_link(
        &self,
        url: String,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        validate_url(&url).map_err(|e| match e {
            UrlValidationError::Missing => AppError::bad_request(e.to_string(), json!(null)),
            UrlValidationError::InvalidFormat(ref reason) => {
                AppError::bad_request(e.to_string(), json!({ "reason": reason }))
            }
        })?;

        let code = if let Some(custom) = custom_code {
            validate_custom_code(&custom)?;

            if self
                .link_repository
                .find_by_code(&custom)
                .await?
                .is_some()
            {
                return Err(AppError::conflict(
                    "Code already exists",
                    json!({ "code": custom }),
                ));
            }

            custom
        } else {
            self.generate_unique_code().await?
        };

        self.link_repository.create(NewLink { code, url }).await
    }

    /// Lists every link, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.list().await
    }

    /// Retrieves a link by its code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| not_found(code))
    }

    /// Deletes a link by its code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        self.link_repository.delete(code).await
    }

    /// Resolves a redirect: records one click and returns the updated link.
    ///
    /// Reserved route segments and strings that cannot be codes are answered
    /// with not-found without any store access. Otherwise the lookup and the
    /// increment are a single store operation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for reserved, malformed or unknown codes.
    pub async fn record_click(&self, code: &str) -> Result<Link, AppError> {
        if is_reserved_segment(code) || !is_valid_code(code) {
            return Err(not_found(code));
        }

        self.link_repository
            .increment_click(code)
            .await?
            .ok_or_else(|| not_found(code))
    }

    /// Returns true if the store answers a round trip.
    pub async fn is_store_healthy(&self) -> bool {
        match self.link_repository.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Store health check failed");
                false
            }
        }
    }

    /// Constructs the public short URL for a code.
    pub fn short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }

    /// Picks a code for a new link.
    ///
    /// Tries up to [`MAX_GENERATION_ATTEMPTS`] random 7-character codes,
    /// accepting the first one not already stored. If all of them collide,
    /// returns one 8-character code without checking it; a real duplicate is
    /// then rejected by the insert.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let candidate = generate_code(GENERATED_CODE_LENGTH);

            if self
                .link_repository
                .find_by_code(&candidate)
                .await?
                .is_none()
            {
                return Ok(candidate);
            }
        }

        tracing::warn!(
            attempts = MAX_GENERATION_ATTEMPTS,
            "All generated codes collided, falling back to an unchecked {}-character code",
            FALLBACK_CODE_LENGTH
        );

        Ok(generate_code(FALLBACK_CODE_LENGTH))
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("Not found", json!({ "code": code }))
}
