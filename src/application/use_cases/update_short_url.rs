//! Point an owned link at a new destination.

use std::sync::Arc;

use crate::application::dto::LinkOutput;
use crate::application::use_cases::load_owned_link;
use crate::domain::entities::LinkId;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateShortUrlInput {
    pub id: LinkId,
    pub user_id: String,
    pub new_original_url: String,
}

/// Changes the destination of a link its owner still holds.
pub struct UpdateShortUrlUseCase<L: ?Sized = dyn LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> UpdateShortUrlUseCase<L> {
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the link is missing or deleted
    /// - [`AppError::Forbidden`] if `user_id` does not own the link
    /// - [`AppError::Validation`] if `new_original_url` is not a valid URL;
    ///   nothing is persisted
    /// - [`AppError::Internal`] on storage errors
    pub async fn execute(&self, input: UpdateShortUrlInput) -> Result<LinkOutput, AppError> {
        let mut link = load_owned_link(&*self.link_repository, input.id, &input.user_id).await?;

        link.update_original_url(input.new_original_url)?;
        self.link_repository.update(&link).await?;

        tracing::info!(link_id = %link.id(), "link destination updated");

        Ok(LinkOutput::from(&link))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Link, LinkProps};
    use crate::domain::repositories::MockLinkRepository;
    use uuid::Uuid;

    fn owned_by(owner: &str) -> Link {
        Link::new(
            LinkProps::new("https://old.example.com", "abc123").owned_by(Some(owner.to_string())),
        )
        .unwrap()
    }

    fn input(id: LinkId, user_id: &str, url: &str) -> UpdateShortUrlInput {
        UpdateShortUrlInput {
            id,
            user_id: user_id.to_string(),
            new_original_url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_update_by_owner() {
        let link = owned_by("user-a");
        let id = link.id();

        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_id()
            .withf(move |candidate| *candidate == id)
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));
        repo.expect_update()
            .withf(|link| link.original_url() == "https://new.example.com")
            .times(1)
            .returning(|_| Ok(()));

        let output = UpdateShortUrlUseCase::new(Arc::new(repo))
            .execute(input(id, "user-a", "https://new.example.com"))
            .await
            .unwrap();

        assert_eq!(output.id, id);
        assert_eq!(output.original_url, "https://new.example.com");
        assert_eq!(output.short_code, "abc123");
    }

    #[tokio::test]
    async fn test_update_by_other_user_is_forbidden() {
        let link = owned_by("user-a");
        let id = link.id();

        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(link.clone())));
        repo.expect_update().never();

        let err = UpdateShortUrlUseCase::new(Arc::new(repo))
            .execute(input(id, "user-b", "https://new.example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_or_deleted_is_not_found() {
        let mut deleted = owned_by("user-a");
        deleted.soft_delete();
        let deleted_id = deleted.id();

        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_id().returning(move |id| {
            if id == deleted_id {
                Ok(Some(deleted.clone()))
            } else {
                Ok(None)
            }
        });
        repo.expect_update().never();

        let use_case = UpdateShortUrlUseCase::new(Arc::new(repo));

        for id in [deleted_id, Uuid::new_v4()] {
            let err = use_case
                .execute(input(id, "user-a", "https://new.example.com"))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::NotFound { .. }), "id {id}");
        }
    }

    #[tokio::test]
    async fn test_update_with_invalid_url_is_not_persisted() {
        let link = owned_by("user-a");
        let id = link.id();

        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(link.clone())));
        repo.expect_update().never();

        let err = UpdateShortUrlUseCase::new(Arc::new(repo))
            .execute(input(id, "user-a", "definitely not a url"))
            .await
            .unwrap_err();

        match err {
            AppError::Validation { details, .. } => {
                assert!(details.get("original_url").is_some());
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
