//! Handlers for the owner's link management endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::urls::{ShortUrlListResponse, ShortUrlResponse, UpdateUrlRequest};
use crate::api::middleware::Identity;
use crate::application::use_cases::{
    DeleteShortUrlInput, ListUserUrlsInput, UpdateShortUrlInput,
};
use crate::domain::entities::LinkId;
use crate::error::AppError;
use crate::state::AppState;

/// A malformed id can name no link, so it is reported like a missing one.
fn parse_link_id(raw: &str) -> Result<LinkId, AppError> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::not_found("Short URL not found", json!({ "id": raw })))
}

/// Lists the caller's active links.
///
/// # Endpoint
///
/// `GET /urls` (bearer token required)
///
/// # Response
///
/// ```json
/// {
///   "data": [
///     {
///       "id": "5f0c...",
///       "short_code": "http://localhost:3000/urls/aB3_x-",
///       "original_url": "https://example.com",
///       "clicks": 4,
///       "created_at": "2025-03-01T10:00:00Z"
///     }
///   ]
/// }
/// ```
pub async fn list_urls_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<ShortUrlListResponse>, AppError> {
    let user_id = identity.require()?;

    let outputs = state
        .list_user_urls
        .execute(ListUserUrlsInput {
            user_id: user_id.to_string(),
        })
        .await?;

    Ok(Json(ShortUrlListResponse::present(&outputs, &state.base_url)))
}

/// Points a link at a new destination.
///
/// # Endpoint
///
/// `PATCH /urls/{id}` (bearer token required, owner only)
///
/// # Request Body
///
/// ```json
/// { "new_original_url": "https://example.org" }
/// ```
///
/// # Errors
///
/// - 401 without a valid token
/// - 403 if the caller does not own the link
/// - 404 if the link is missing or deleted
/// - 422 if the new URL is invalid
pub async fn update_url_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<UpdateUrlRequest>,
) -> Result<Json<ShortUrlResponse>, AppError> {
    let user_id = identity.require()?;
    payload.validate()?;

    let output = state
        .update_short_url
        .execute(UpdateShortUrlInput {
            id: parse_link_id(&id)?,
            user_id: user_id.to_string(),
            new_original_url: payload.new_original_url,
        })
        .await?;

    Ok(Json(ShortUrlResponse::present(&output, &state.base_url)))
}

/// Soft-deletes a link.
///
/// # Endpoint
///
/// `DELETE /urls/{id}` (bearer token required, owner only)
///
/// # Response
///
/// `204 No Content`
///
/// # Errors
///
/// - 401 without a valid token
/// - 403 if the caller does not own the link
/// - 404 if the link is missing or already deleted
pub async fn delete_url_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<StatusCode, AppError> {
    let user_id = identity.require()?;

    state
        .delete_short_url
        .execute(DeleteShortUrlInput {
            id: parse_link_id(&id)?,
            user_id: user_id.to_string(),
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
