//! Bearer identity middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Who is calling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    User(String),
}

impl Identity {
    /// Returns the user id, if any.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Identity::Anonymous => None,
            Identity::User(id) => Some(id),
        }
    }

    /// Returns the user id of an identified caller.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for anonymous callers.
    pub fn require(&self) -> Result<&str, AppError> {
        self.user_id().ok_or_else(|| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Authorization header is missing or invalid" }),
            )
        })
    }
}

/// Resolves the caller's [`Identity`] and stores it in request extensions.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <user_id>.<signature>
/// ```
///
/// A missing, malformed or badly signed token never rejects the request here;
/// it resolves to [`Identity::Anonymous`]. Handlers that need an owner call
/// [`Identity::require`], which yields `401 Unauthorized`.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let urls = Router::new()
///     .route("/urls", get(list_urls_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let identity = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(token)) => match st.auth_service.verify_token(&token) {
            Ok(user_id) => Identity::User(user_id),
            Err(_) => {
                tracing::debug!("invalid bearer token, continuing anonymously");
                Identity::Anonymous
            }
        },
        Err(_) => Identity::Anonymous,
    };

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(identity);

    next.run(req).await
}
