//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Returns 302 Found with `Location` set to the target. The click is counted in the same
/// store operation that looks the link up, so a 302 always means exactly one click.
///
/// # Errors
///
/// Returns 404 Not Found if the code is malformed or unknown.
/// Returns 500 if the store fails or the stored target is not a valid header value.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let record = state.redirect_service.resolve(&code).await?;

    let location = HeaderValue::try_from(record.target_url).map_err(|e| {
        AppError::internal(
            "Stored target URL is not a valid Location header",
            json!({ "code": record.code, "cause": e.to_string() }),
        )
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}
