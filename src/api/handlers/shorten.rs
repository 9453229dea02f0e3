//! Handler for link shortening endpoint.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::urls::{ShortenRequest, ShortenResponse};
use crate::api::middleware::Identity;
use crate::application::use_cases::ShortenUrlInput;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /urls`
///
/// Authentication is optional: with a valid bearer token the link is owned
/// by the caller, otherwise it is anonymous.
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "short_url": "http://localhost:3000/urls/aB3_x-" }
/// ```
///
/// # Errors
///
/// - 422 if `url` is not a URL
/// - 404 if the token names a user that does not exist
/// - 409 if the caller already has an active link for this URL
/// - 500 if no free short code was found
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let output = state
        .shorten_url
        .execute(ShortenUrlInput {
            url: payload.url,
            owner_id: identity.user_id().map(str::to_string),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse::present(&output, &state.base_url)),
    ))
}
