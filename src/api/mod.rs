//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into service calls and formats responses.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Tracing and CORS layers
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
