//! Handlers for link management endpoints (create, list, get, delete).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::link::{CreateLinkRequest, DeleteLinkResponse, LinkResponse};
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;

fn to_response(state: &AppState, link: Link) -> LinkResponse {
    let short_url = state.link_service.short_url(&link.code);
    LinkResponse::from_link(link, short_url)
}

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "target_url": "https://example.com",
///   "code": "abc123"   // optional
/// }
/// ```
///
/// # Errors
///
/// Returns 400 if the body is unreadable, or the URL or custom code is invalid.
/// Returns 409 if the custom code is taken.
/// Returns 500 if no unique code could be generated or the store fails.
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let Json(payload) = payload?;
    let (target_url, code) = payload.into_parts()?;

    let link = state.link_service.create_link(target_url, code).await?;

    Ok((StatusCode::CREATED, Json(to_response(&state, link))))
}

/// Lists all links, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links().await?;

    Ok(Json(
        links
            .into_iter()
            .map(|link| to_response(&state, link))
            .collect(),
    ))
}

/// Returns a single link without counting a click.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;

    Ok(Json(to_response(&state, link)))
}

/// Permanently deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// The code becomes free again; later redirects for it return 404.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteLinkResponse>, AppError> {
    let link = state.link_service.delete_link(&code).await?;

    Ok(Json(DeleteLinkResponse {
        message: "Link deleted successfully".to_string(),
        link: to_response(&state, link),
    }))
}
