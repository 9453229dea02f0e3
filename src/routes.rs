//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /health`      - Health check: storage ping (public)
//! - `POST   /urls`        - Create a short URL
//! - `GET    /urls`        - List the caller's links
//! - `GET    /urls/{code}` - Redirect
//! - `PATCH  /urls/{id}`   - Update destination
//! - `DELETE /urls/{id}`   - Soft delete
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on mutating routes
//! - **Identity** - Optional bearer token resolved on every `/urls` route
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let write_routes = if behind_proxy {
        api::routes::write_routes().layer(rate_limit::proxied_ip_layer())
    } else {
        api::routes::write_routes().layer(rate_limit::peer_ip_layer())
    };

    let url_router = api::routes::read_routes()
        .merge(write_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(url_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
