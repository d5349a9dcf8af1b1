//! Redirect resolution with click accounting.

use std::sync::Arc;

use crate::domain::entities::ClickRecord;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::is_valid_code;

/// Resolves short codes to target URLs.
///
/// Each successful resolution increments the link's click counter exactly once, in the
/// same store operation that returns the target.
pub struct RedirectService {
    link_repository: Arc<dyn LinkRepository>,
}

impl RedirectService {
    pub fn new(link_repository: Arc<dyn LinkRepository>) -> Self {
        Self { link_repository }
    }

    /// Resolves `code` and records the visit.
    ///
    /// Malformed codes are reported as [`AppError::NotFound`] without touching the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is malformed or unknown.
    /// Returns [`AppError::Internal`] on store errors; no click is counted.
    pub async fn resolve(&self, code: &str) -> Result<ClickRecord, AppError> {
        if !is_valid_code(code) {
            tracing::debug!(%code, "Rejected malformed code");
            return Err(AppError::not_found(code));
        }

        let record = self.link_repository.increment_click(code).await?;

        metrics::counter!("tinylink_redirects_total").increment(1);
        tracing::debug!(
            code = %record.code,
            clicks = record.clicks,
            "Resolved short link"
        );

        Ok(record)
    }
}
