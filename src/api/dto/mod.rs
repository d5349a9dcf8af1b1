//! Data Transfer Objects for API requests and responses.
//!
//! DTOs only shape JSON; semantic validation happens in the application services.

pub mod health;
pub mod link;
