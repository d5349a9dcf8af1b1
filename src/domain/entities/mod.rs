//! Core domain entities.
//!
//! - [`Link`] - A persisted short link
//! - [`NewLink`] - Input for inserting a link
//! - [`ClickRecord`] - Result of an atomic click increment

pub mod link;

pub use link::{ClickRecord, Link, NewLink};
