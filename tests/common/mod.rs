#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tinylink::domain::entities::{ClickRecord, Link, NewLink};
use tinylink::domain::repositories::{LinkRepository, LinkTotals};
use tinylink::error::AppError;
use tinylink::routes::router;
use tinylink::state::AppState;

pub const TEST_BASE_URL: &str = "https://s.test";

/// In-process link store with the same contract as the Postgres table:
/// codes are unique and every operation is atomic under one lock.
#[derive(Default)]
pub struct MemoryLinkRepository {
    inner: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    next_id: i64,
    links: Vec<Link>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a row directly, bypassing the registrar.
    pub fn seed(&self, code: &str, target_url: &str) -> Link {
        let mut state = self.inner.lock().unwrap();
        state.next_id += 1;
        let link = Link::new(
            state.next_id,
            code.to_string(),
            target_url.to_string(),
            0,
            None,
            Utc::now(),
        );
        state.links.push(link.clone());
        link
    }

    pub fn get(&self, code: &str) -> Option<Link> {
        let state = self.inner.lock().unwrap();
        state.links.iter().find(|l| l.code == code).cloned()
    }

    pub fn count(&self) -> usize {
        self.inner.lock().unwrap().links.len()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert_unique(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut state = self.inner.lock().unwrap();

        if state.links.iter().any(|l| l.code == new_link.code) {
            return Err(AppError::conflict(new_link.code));
        }

        state.next_id += 1;
        let link = Link::new(
            state.next_id,
            new_link.code,
            new_link.target_url,
            0,
            None,
            Utc::now(),
        );
        state.links.push(link.clone());
        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.get(code))
    }

    async fn increment_click(&self, code: &str) -> Result<ClickRecord, AppError> {
        let mut state = self.inner.lock().unwrap();
        let link = state
            .links
            .iter_mut()
            .find(|l| l.code == code)
            .ok_or_else(|| AppError::not_found(code))?;

        let now = Utc::now();
        link.clicks += 1;
        link.last_clicked = Some(now);

        Ok(ClickRecord {
            code: link.code.clone(),
            target_url: link.target_url.clone(),
            clicks: link.clicks,
            last_clicked: now,
        })
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        let mut links = self.inner.lock().unwrap().links.clone();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(links)
    }

    async fn delete_by_code(&self, code: &str) -> Result<Link, AppError> {
        let mut state = self.inner.lock().unwrap();
        let pos = state
            .links
            .iter()
            .position(|l| l.code == code)
            .ok_or_else(|| AppError::not_found(code))?;

        Ok(state.links.remove(pos))
    }

    async fn totals(&self) -> Result<LinkTotals, AppError> {
        let state = self.inner.lock().unwrap();
        Ok(LinkTotals {
            links: state.links.len() as i64,
            clicks: state.links.iter().map(|l| l.clicks).sum(),
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Store that is permanently unreachable.
pub struct UnavailableLinkRepository;

fn unavailable() -> AppError {
    AppError::unavailable("Database unavailable", json!({ "cause": "pool timed out" }))
}

#[async_trait]
impl LinkRepository for UnavailableLinkRepository {
    async fn insert_unique(&self, _new_link: NewLink) -> Result<Link, AppError> {
        Err(unavailable())
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<Link>, AppError> {
        Err(unavailable())
    }

    async fn increment_click(&self, _code: &str) -> Result<ClickRecord, AppError> {
        Err(unavailable())
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        Err(unavailable())
    }

    async fn delete_by_code(&self, _code: &str) -> Result<Link, AppError> {
        Err(unavailable())
    }

    async fn totals(&self) -> Result<LinkTotals, AppError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unavailable())
    }
}

pub fn create_test_state() -> (AppState, Arc<MemoryLinkRepository>) {
    let repo = Arc::new(MemoryLinkRepository::new());
    let state = AppState::new(repo.clone(), TEST_BASE_URL);
    (state, repo)
}

pub fn create_unavailable_state() -> AppState {
    AppState::new(Arc::new(UnavailableLinkRepository), TEST_BASE_URL)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}
