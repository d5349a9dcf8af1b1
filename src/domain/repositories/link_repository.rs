//! Repository trait for link storage.

use crate::domain::entities::{ClickRecord, Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Aggregate counters over the whole link table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkTotals {
    pub links: i64,
    pub clicks: i64,
}

/// Storage contract for short links.
///
/// Every method is a single atomic operation at the storage layer. Implementations must
/// enforce code uniqueness themselves and must perform the click increment as one
/// read-modify-write inside the store, never as fetch-then-write in application code.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a link, relying on the store's uniqueness constraint.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeConflict`] if the code already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert_unique(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Atomically adds one click and sets `last_clicked` to now.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Internal`] on database errors; the row is left untouched.
    async fn increment_click(&self, code: &str) -> Result<ClickRecord, AppError>;

    /// Lists every link, newest `created_at` first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_all(&self) -> Result<Vec<Link>, AppError>;

    /// Permanently deletes a link and returns the removed row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_by_code(&self, code: &str) -> Result<Link, AppError>;

    /// Counts links and sums their clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn totals(&self) -> Result<LinkTotals, AppError>;

    /// Verifies the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;
}
