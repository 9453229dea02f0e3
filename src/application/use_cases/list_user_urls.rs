//! List the active links of one user.

use std::sync::Arc;

use crate::application::dto::LinkOutput;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct ListUserUrlsInput {
    pub user_id: String,
}

/// Returns the caller's active links in repository order (oldest first).
/// A user without links gets an empty list.
pub struct ListUserUrlsUseCase<L: ?Sized = dyn LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> ListUserUrlsUseCase<L> {
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn execute(&self, input: ListUserUrlsInput) -> Result<Vec<LinkOutput>, AppError> {
        let links = self
            .link_repository
            .find_all_by_owner(&input.user_id)
            .await?;

        Ok(links
            .iter()
            .filter(|link| !link.is_deleted() && link.is_owned_by(&input.user_id))
            .map(LinkOutput::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Link, LinkProps};
    use crate::domain::repositories::MockLinkRepository;

    fn owned(code: &str, owner: &str) -> Link {
        Link::new(
            LinkProps::new(format!("https://example.com/{code}"), code)
                .owned_by(Some(owner.to_string())),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_returns_repository_order() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_all_by_owner()
            .withf(|owner| owner == "user-1")
            .times(1)
            .returning(|owner| Ok(vec![owned("one", owner), owned("two", owner)]));

        let output = ListUserUrlsUseCase::new(Arc::new(repo))
            .execute(ListUserUrlsInput {
                user_id: "user-1".to_string(),
            })
            .await
            .unwrap();

        let codes: Vec<_> = output.iter().map(|o| o.short_code.as_str()).collect();
        assert_eq!(codes, ["one", "two"]);
    }

    #[tokio::test]
    async fn test_list_never_leaks_deleted_or_foreign_links() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_all_by_owner().returning(|owner| {
            let mut deleted = owned("gone", owner);
            deleted.soft_delete();
            Ok(vec![owned("mine", owner), deleted, owned("theirs", "user-2")])
        });

        let output = ListUserUrlsUseCase::new(Arc::new(repo))
            .execute(ListUserUrlsInput {
                user_id: "user-1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(output.len(), 1);
        assert_eq!(output[0].short_code, "mine");
    }

    #[tokio::test]
    async fn test_list_empty() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_all_by_owner().returning(|_| Ok(Vec::new()));

        let output = ListUserUrlsUseCase::new(Arc::new(repo))
            .execute(ListUserUrlsInput {
                user_id: "nobody".to_string(),
            })
            .await
            .unwrap();

        assert!(output.is_empty());
    }
}
