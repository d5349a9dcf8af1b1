//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{ClickRecord, Link, NewLink};
use crate::domain::repositories::{LinkRepository, LinkTotals};
use crate::error::AppError;

/// PostgreSQL repository for link storage.
///
/// Uniqueness of `code` is enforced by the `links_code_key` constraint, and the click
/// increment is a single `UPDATE ... RETURNING` statement.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert_unique(&self, new_link: NewLink) -> Result<Link, AppError> {
        sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (code, target_url)
            VALUES ($1, $2)
            RETURNING id, code, target_url, clicks, last_clicked, created_at
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.target_url)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::CodeConflict { .. } => AppError::conflict(new_link.code.as_str()),
            other => other,
        })
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, code, target_url, clicks, last_clicked, created_at
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn increment_click(&self, code: &str) -> Result<ClickRecord, AppError> {
        sqlx::query_as::<_, ClickRecord>(
            r#"
            UPDATE links
            SET clicks = clicks + 1,
                last_clicked = NOW()
            WHERE code = $1
            RETURNING code, target_url, clicks, last_clicked
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| AppError::not_found(code))
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        let links = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, code, target_url, clicks, last_clicked, created_at
            FROM links
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    async fn delete_by_code(&self, code: &str) -> Result<Link, AppError> {
        sqlx::query_as::<_, Link>(
            r#"
            DELETE FROM links
            WHERE code = $1
            RETURNING id, code, target_url, clicks, last_clicked, created_at
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| AppError::not_found(code))
    }

    async fn totals(&self) -> Result<LinkTotals, AppError> {
        let (links, clicks) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(*)::BIGINT, COALESCE(SUM(clicks), 0)::BIGINT
            FROM links
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(LinkTotals { links, clicks })
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
