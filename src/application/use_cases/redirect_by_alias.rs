//! Resolve a short code and count the visit.

use std::sync::Arc;

use serde_json::json;

use crate::application::dto::LinkOutput;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct RedirectByAliasInput {
    pub alias: String,
}

/// Looks up an active link by alias, increments its click counter and
/// persists it.
///
/// The returned output carries the post-increment state. The increment is a
/// read-modify-write over the repository: two concurrent redirects on the
/// same link can lose one count.
pub struct RedirectByAliasUseCase<L: ?Sized = dyn LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> RedirectByAliasUseCase<L> {
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no link has this alias or it was deleted
    /// - [`AppError::Internal`] on storage errors
    pub async fn execute(&self, input: RedirectByAliasInput) -> Result<LinkOutput, AppError> {
        let mut link = self
            .link_repository
            .find_by_alias(&input.alias)
            .await?
            .filter(|link| !link.is_deleted())
            .ok_or_else(|| {
                AppError::not_found("Short URL not found", json!({ "alias": input.alias }))
            })?;

        link.increment_clicks();
        self.link_repository.update(&link).await?;

        tracing::debug!(short_code = link.short_code(), clicks = link.clicks(), "redirect");

        Ok(LinkOutput::from(&link))
    }
}
