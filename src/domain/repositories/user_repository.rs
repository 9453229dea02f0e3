//! Repository trait for user records.

use crate::domain::entities::User;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for users that can own links.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the id is already taken.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, user: &User) -> Result<(), AppError>;
}
