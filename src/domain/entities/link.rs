//! Link entity representing a short code mapped to a target URL.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A persisted short link.
///
/// `code` is the identity; `id` is a surrogate key that is never used for lookups.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub clicks: i64,
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        code: String,
        target_url: String,
        clicks: i64,
        last_clicked: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            target_url,
            clicks,
            last_clicked,
            created_at,
        }
    }

    /// Returns true if the link has never been followed.
    pub fn is_unvisited(&self) -> bool {
        self.last_clicked.is_none()
    }
}

/// Input data for inserting a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub target_url: String,
}

/// Fields returned by an atomic click increment.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ClickRecord {
    pub code: String,
    pub target_url: String,
    pub clicks: i64,
    pub last_clicked: DateTime<Utc>,
}
