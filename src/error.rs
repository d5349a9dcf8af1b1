//! Application error taxonomy and its HTTP mapping.
//!
//! Input-shape errors ([`AppError::InvalidUrl`], [`AppError::InvalidCodeFormat`]) are raised
//! before any store access. Store failures surface as [`AppError::Internal`] and are never
//! reported as [`AppError::NotFound`].

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Name of the unique constraint guarding `links.code`.
pub const LINKS_CODE_CONSTRAINT: &str = "links_code_key";

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Error payload returned to API clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Target URL missing, unparsable, relative, or not http(s).
    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    /// Custom code is not 6-8 alphanumeric characters.
    #[error("{message}")]
    InvalidCodeFormat { message: String, details: Value },

    /// The store rejected the insert because the code is taken.
    #[error("Code already exists: {code}")]
    CodeConflict { code: String },

    /// Every generated candidate collided.
    #[error("Failed to generate unique code after {attempts} attempts")]
    CodeGenerationExhausted { attempts: usize },

    #[error("Link not found: {code}")]
    NotFound { code: String },

    /// Store or connectivity failure.
    #[error("{message}")]
    Internal {
        message: String,
        retryable: bool,
        details: Value,
    },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_code_format(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidCodeFormat {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(code: impl Into<String>) -> Self {
        Self::CodeConflict { code: code.into() }
    }

    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            retryable: false,
            details,
        }
    }

    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            retryable: true,
            details,
        }
    }

    /// Returns true when repeating the same operation may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Internal { retryable: true, .. })
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidUrl { .. } | Self::InvalidCodeFormat { .. } => StatusCode::BAD_REQUEST,
            Self::CodeConflict { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::CodeGenerationExhausted { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converts the error into the serializable payload used in responses.
    pub fn to_error_info(&self) -> ErrorInfo {
        let message = self.to_string();
        let (code, details) = match self {
            Self::InvalidUrl { details, .. } => ("invalid_url", details.clone()),
            Self::InvalidCodeFormat { details, .. } => ("invalid_code_format", details.clone()),
            Self::CodeConflict { code } => ("code_conflict", json!({ "code": code })),
            Self::CodeGenerationExhausted { attempts } => (
                "code_generation_exhausted",
                json!({ "attempts": attempts }),
            ),
            Self::NotFound { code } => ("not_found", json!({ "code": code })),
            // Store internals are not echoed back to clients.
            Self::Internal { retryable, .. } => {
                ("internal_error", json!({ "retryable": retryable }))
            }
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let Self::Internal {
            message, details, ..
        } = &self
        {
            tracing::error!(%message, %details, "Request failed with internal error");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

/// A create body that cannot be read at all (bad JSON, wrong content type, non-object) has no
/// usable target URL, so it is reported as [`AppError::InvalidUrl`].
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::invalid_url(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

/// Maps a database error onto the application taxonomy.
///
/// A unique violation on [`LINKS_CODE_CONSTRAINT`] becomes [`AppError::CodeConflict`] with an
/// empty code; callers that know the code replace it. Pool exhaustion and I/O failures are
/// retryable; everything else is fatal.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
        && db.constraint() == Some(LINKS_CODE_CONSTRAINT)
    {
        return AppError::conflict(String::new());
    }

    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            AppError::unavailable("Database unavailable", json!({ "cause": e.to_string() }))
        }
        _ => AppError::internal("Database error", json!({ "cause": e.to_string() })),
    }
}
