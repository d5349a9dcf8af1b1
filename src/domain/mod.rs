//! Domain layer: entities and the storage contract.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependency on infrastructure or presentation. Business rules
//! live in [`crate::application::services`].

pub mod entities;
pub mod repositories;
