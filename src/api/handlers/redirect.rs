//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::application::use_cases::RedirectByAliasInput;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL and counts the click.
///
/// # Endpoint
///
/// `GET /urls/{alias}`
///
/// # Response
///
/// `302 Found` with `Location: <original_url>`.
///
/// # Errors
///
/// Returns 404 Not Found if the alias is unknown or the link was deleted.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let output = state
        .redirect_by_alias
        .execute(RedirectByAliasInput { alias })
        .await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, output.original_url)]))
}
