use std::sync::Arc;
use std::time::Instant;

use crate::application::services::{LinkService, RedirectService};
use crate::domain::repositories::LinkRepository;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub started_at: Instant,
}

impl AppState {
    /// Wires both services to the same link store.
    pub fn new(link_repository: Arc<dyn LinkRepository>, base_url: impl Into<String>) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(link_repository.clone(), base_url)),
            redirect_service: Arc::new(RedirectService::new(link_repository)),
            started_at: Instant::now(),
        }
    }
}
