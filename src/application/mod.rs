//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::LinkRepository`] trait and expose
//! the operations HTTP handlers and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link registration, lookup and deletion
//! - [`services::redirect_service::RedirectService`] - Redirect resolution and click counting

pub mod services;
