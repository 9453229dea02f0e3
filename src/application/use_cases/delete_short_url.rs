//! Soft-delete an owned link.

use std::sync::Arc;

use crate::application::use_cases::load_owned_link;
use crate::domain::entities::LinkId;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteShortUrlInput {
    pub id: LinkId,
    pub user_id: String,
}

/// Marks a link as deleted on behalf of its owner.
///
/// A link that is already deleted is reported as missing, same as one that
/// never existed.
pub struct DeleteShortUrlUseCase<L: ?Sized = dyn LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> DeleteShortUrlUseCase<L> {
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the link is missing or already deleted
    /// - [`AppError::Forbidden`] if `user_id` does not own the link
    /// - [`AppError::Internal`] on storage errors
    pub async fn execute(&self, input: DeleteShortUrlInput) -> Result<(), AppError> {
        let mut link = load_owned_link(&*self.link_repository, input.id, &input.user_id).await?;

        link.soft_delete();
        self.link_repository.update(&link).await?;

        tracing::info!(link_id = %link.id(), "link soft-deleted");

        Ok(())
    }
}
