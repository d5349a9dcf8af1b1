//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated via
//! `mockall` for unit tests.
//!
//! See integration tests in `tests/repository_link.rs` for usage against PostgreSQL.

pub mod link_repository;

pub use link_repository::{LinkRepository, LinkTotals};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
