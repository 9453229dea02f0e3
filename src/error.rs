//! Application error type and its HTTP representation.
//!
//! Every failure a use case can raise is one variant of [`AppError`]. The
//! variants stay distinguishable all the way to the HTTP layer, where
//! [`IntoResponse`] maps each kind to a status code and a JSON envelope:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Short URL not found", "details": {} } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::validators::EntityValidationError;
use crate::utils::validation::field_messages;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload shared by every error response.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors raised by use cases, repositories and the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed entity fields or request body. `details` holds the
    /// `field -> [messages]` map.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Missing or soft-deleted target, or an unknown owner reference.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The requester does not own the target link.
    #[error("{message}")]
    Forbidden { message: String, details: Value },

    /// Duplicate active link for the same owner, or a uniqueness violation.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// A route that needs an identity was called anonymously.
    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    /// The short code collision budget was exhausted.
    #[error("{message}")]
    RetriesExhausted { message: String, details: Value },

    /// Storage or other infrastructure failure.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn retries_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::RetriesExhausted {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Forbidden { .. } => "forbidden",
            AppError::Conflict { .. } => "conflict",
            AppError::Unauthorized { .. } => "unauthorized",
            AppError::RetriesExhausted { .. } => "code_generation_exhausted",
            AppError::Internal { .. } => "internal_error",
        }
    }

    /// HTTP status used when this error reaches the transport layer.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::RetriesExhausted { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the `details` payload attached to the error.
    pub fn details(&self) -> &Value {
        match self {
            AppError::Validation { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::Forbidden { details, .. }
            | AppError::Conflict { details, .. }
            | AppError::Unauthorized { details, .. }
            | AppError::RetriesExhausted { details, .. }
            | AppError::Internal { details, .. } => details,
        }
    }

    /// Converts the error into the serializable payload without consuming it.
    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.code(),
            message: self.to_string(),
            details: self.details().clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        }

        let mut response = (
            status,
            Json(ErrorBody {
                error: self.to_error_info(),
            }),
        )
            .into_response();

        if matches!(self, AppError::Unauthorized { .. }) {
            response.headers_mut().insert(
                axum::http::header::WWW_AUTHENTICATE,
                axum::http::HeaderValue::from_static("Bearer"),
            );
        }

        response
    }
}

impl From<EntityValidationError> for AppError {
    fn from(err: EntityValidationError) -> Self {
        AppError::validation(err.to_string(), json!(err.errors()))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::validation("Invalid request", json!(field_messages(&errors)))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

/// Maps a database error to an application error.
///
/// Unique violations become [`AppError::Conflict`] carrying the constraint
/// name; everything else is reported as [`AppError::Internal`] without
/// leaking driver details to clients.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return AppError::conflict(
            "Unique constraint violation",
            json!({ "constraint": db.constraint() }),
        );
    }

    tracing::error!(error = %e, "database error");
    AppError::internal("Database error", json!({}))
}
