//! PostgreSQL repository implementations.
//!
//! - [`PgLinkRepository`] - Link storage, atomic click accounting

pub mod pg_link_repository;

pub use pg_link_repository::PgLinkRepository;
