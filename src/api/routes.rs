//! API route configuration.
//!
//! Every `/urls` route goes through [`crate::api::middleware::auth`], which
//! resolves the caller's identity. Handlers decide whether an identity is
//! required.

use crate::api::handlers::{
    delete_url_handler, list_urls_handler, redirect_handler, shorten_handler, update_url_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post},
};

/// Read-only routes.
///
/// # Endpoints
///
/// - `GET /urls`         - List the caller's links (token required)
/// - `GET /urls/{key}`   - Redirect by short code
pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", get(list_urls_handler))
        .route("/urls/{key}", get(redirect_handler))
}

/// Routes that create or change links.
///
/// # Endpoints
///
/// - `POST   /urls`        - Create a short URL (token optional)
/// - `PATCH  /urls/{key}`  - Change the destination of a link by id
/// - `DELETE /urls/{key}`  - Soft-delete a link by id
///
/// `{key}` is a short code on reads and a link id on writes; the router
/// needs one parameter name per position.
pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", post(shorten_handler))
        .route(
            "/urls/{key}",
            patch(update_url_handler).delete(delete_url_handler),
        )
}

/// All `/urls` routes without rate limiting.
pub fn url_routes() -> Router<AppState> {
    read_routes().merge(write_routes())
}
