//! Pure helpers shared by the services.
//!
//! - [`code_generator`] - Short code generation and format validation
//! - [`url_validator`] - Target URL validation

pub mod code_generator;
pub mod url_validator;
