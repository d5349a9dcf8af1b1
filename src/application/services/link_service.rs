//! Link registration and management service.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, LinkTotals};
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::url_validator::validate_target_url;
use serde_json::json;

/// Upper bound on generate-and-insert attempts for a single creation.
pub const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Path segments owned by fixed routes; a link with one of these codes would be unreachable.
pub const RESERVED_CODES: &[&str] = &["healthz"];

/// Service for creating, reading and deleting short links.
///
/// Code uniqueness is decided by the store's constraint alone: the service inserts and
/// reads a [`AppError::CodeConflict`] as the collision signal instead of checking first.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<dyn LinkRepository>, base_url: impl Into<String>) -> Self {
        Self {
            link_repository,
            base_url: base_url.into(),
        }
    }

    /// Creates a short link.
    ///
    /// # Code Selection
    ///
    /// - With `custom_code`: validates the format and inserts it directly
    /// - Otherwise: generates a random 6-character code, retrying on collision up to
    ///   [`MAX_GENERATION_ATTEMPTS`] times
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] if `target_url` is missing or not http(s).
    /// Returns [`AppError::InvalidCodeFormat`] if the custom code is malformed.
    /// Returns [`AppError::CodeConflict`] if the custom code is taken.
    /// Returns [`AppError::CodeGenerationExhausted`] if every generated code collided.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn create_link(
        &self,
        target_url: Option<String>,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        let target_url = target_url.unwrap_or_default();
        validate_target_url(&target_url).map_err(|e| {
            AppError::invalid_url("Invalid URL provided", json!({ "reason": e.to_string() }))
        })?;

        let link = match custom_code {
            Some(code) => self.insert_custom(code, target_url).await?,
            None => self.insert_generated(target_url).await?,
        };

        metrics::counter!("tinylink_links_created_total").increment(1);
        tracing::info!(code = %link.code, target_url = %link.target_url, "Link created");

        Ok(link)
    }

    /// Retrieves a link by code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found(code))
    }

    /// Lists all links, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        let links = self.link_repository.list_all().await?;
        tracing::debug!(count = links.len(), "Listed links");
        Ok(links)
    }

    /// Deletes a link permanently and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn delete_link(&self, code: &str) -> Result<Link, AppError> {
        let link = self.link_repository.delete_by_code(code).await?;
        tracing::info!(code = %link.code, "Link deleted");
        Ok(link)
    }

    /// Returns link count and total clicks.
    pub async fn totals(&self) -> Result<LinkTotals, AppError> {
        self.link_repository.totals().await
    }

    /// Checks that the store answers.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }

    async fn insert_custom(&self, code: String, target_url: String) -> Result<Link, AppError> {
        validate_custom_code(&code)?;

        if RESERVED_CODES.contains(&code.as_str()) {
            tracing::info!(%code, "Custom code is reserved");
            return Err(AppError::conflict(code));
        }

        let result = self
            .link_repository
            .insert_unique(NewLink { code, target_url })
            .await;

        if let Err(AppError::CodeConflict { code }) = &result {
            tracing::info!(%code, "Custom code already exists");
        }

        result
    }

    async fn insert_generated(&self, target_url: String) -> Result<Link, AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let new_link = NewLink {
                code: generate_code(),
                target_url: target_url.clone(),
            };

            match self.link_repository.insert_unique(new_link).await {
                Ok(link) => return Ok(link),
                Err(AppError::CodeConflict { code }) => {
                    metrics::counter!("tinylink_code_collisions_total").increment(1);
                    tracing::warn!(attempt, %code, "Generated code collided, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        metrics::counter!("tinylink_code_generation_exhausted_total").increment(1);
        tracing::error!(
            attempts = MAX_GENERATION_ATTEMPTS,
            "Failed to generate unique code"
        );

        Err(AppError::CodeGenerationExhausted {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }
}
