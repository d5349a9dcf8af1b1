//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::entities::Link;
use crate::error::AppError;

/// Request to create a short link.
///
/// Fields are kept as raw JSON so a wrong type is reported through [`AppError`] instead of
/// a framework rejection. The registrar owns all other validation.
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    #[serde(default)]
    pub target_url: Option<Value>,

    /// Optional custom short code (6-8 alphanumeric characters).
    #[serde(default)]
    pub code: Option<Value>,
}

impl CreateLinkRequest {
    /// Splits the request into `(target_url, code)`, treating `null` as absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] if `target_url` is not a string.
    /// Returns [`AppError::InvalidCodeFormat`] if `code` is not a string.
    pub fn into_parts(self) -> Result<(Option<String>, Option<String>), AppError> {
        let target_url = string_field(self.target_url).map_err(|found| {
            AppError::invalid_url(
                "Invalid URL provided",
                json!({ "reason": format!("target_url must be a string, got {found}") }),
            )
        })?;

        let code = string_field(self.code).map_err(|found| {
            AppError::invalid_code_format(
                "Code must be a string",
                json!({ "reason": format!("code must be a string, got {found}") }),
            )
        })?;

        Ok((target_url, code))
    }
}

/// `Ok(None)` for missing or null, `Err(type name)` for non-strings.
fn string_field(value: Option<Value>) -> Result<Option<String>, &'static str> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Bool(_)) => Err("boolean"),
        Some(Value::Number(_)) => Err("number"),
        Some(Value::Array(_)) => Err("array"),
        Some(Value::Object(_)) => Err("object"),
    }
}

/// JSON representation of a link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub short_url: String,
    pub clicks: i64,
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn from_link(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            code: link.code,
            target_url: link.target_url,
            short_url,
            clicks: link.clicks,
            last_clicked: link.last_clicked,
            created_at: link.created_at,
        }
    }
}

/// Response for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteLinkResponse {
    pub message: String,
    pub link: LinkResponse,
}
