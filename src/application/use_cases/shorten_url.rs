//! Shorten a long URL into a new link.

use std::sync::Arc;

use serde_json::json;

use crate::application::dto::LinkOutput;
use crate::domain::entities::{Link, LinkProps};
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, DEFAULT_CODE_LENGTH};

/// Number of generated codes tried before giving up.
pub const SHORT_CODE_RETRY_BUDGET: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct ShortenUrlInput {
    pub url: String,
    /// Verified identity of the caller; `None` creates an anonymous link.
    pub owner_id: Option<String>,
}

/// Creates a link for a URL, optionally owned by a known user.
///
/// # Flow
///
/// 1. An owner, if given, must exist
/// 2. An owner may hold at most one active link per URL
/// 3. A fresh code is drawn until one is unused, at most
///    [`SHORT_CODE_RETRY_BUDGET`] times
/// 4. The link is built (validating the URL) and inserted
///
/// Every failure happens before the insert, so nothing is written on error.
pub struct ShortenUrlUseCase<
    L: ?Sized = dyn LinkRepository,
    U: ?Sized = dyn UserRepository,
    G: ?Sized = dyn CodeGenerator,
> {
    link_repository: Arc<L>,
    user_repository: Arc<U>,
    code_generator: Arc<G>,
    code_length: usize,
}

impl<L, U, G> ShortenUrlUseCase<L, U, G>
where
    L: LinkRepository + ?Sized,
    U: UserRepository + ?Sized,
    G: CodeGenerator + ?Sized,
{
    pub fn new(link_repository: Arc<L>, user_repository: Arc<U>, code_generator: Arc<G>) -> Self {
        Self {
            link_repository,
            user_repository,
            code_generator,
            code_length: DEFAULT_CODE_LENGTH,
        }
    }

    /// Overrides the generated code length (default 6).
    pub fn with_code_length(mut self, code_length: usize) -> Self {
        self.code_length = code_length;
        self
    }

    /// # Errors
    ///
    /// - [`AppError::NotFound`] if `owner_id` names an unknown user
    /// - [`AppError::Conflict`] if the owner already has an active link for `url`
    /// - [`AppError::RetriesExhausted`] if every generated code was taken
    /// - [`AppError::Validation`] if `url` is not a valid URL
    /// - [`AppError::Internal`] on storage errors
    pub async fn execute(&self, input: ShortenUrlInput) -> Result<LinkOutput, AppError> {
        if let Some(owner_id) = input.owner_id.as_deref() {
            self.ensure_owner_exists(owner_id).await?;

            if self
                .link_repository
                .find_by_original_url_and_owner_id(&input.url, owner_id)
                .await?
                .is_some()
            {
                return Err(AppError::conflict(
                    "URL already shortened",
                    json!({ "url": input.url }),
                ));
            }
        }

        let code = self.generate_unique_code().await?;

        let link = Link::new(LinkProps::new(input.url, code).owned_by(input.owner_id))?;
        self.link_repository.insert(&link).await?;

        tracing::info!(
            link_id = %link.id(),
            short_code = link.short_code(),
            owner_id = link.owner_id(),
            "link created"
        );

        Ok(LinkOutput::from(&link))
    }

    async fn ensure_owner_exists(&self, owner_id: &str) -> Result<(), AppError> {
        match self.user_repository.find_by_id(owner_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(
                "Owner does not exist",
                json!({ "owner_id": owner_id }),
            )),
        }
    }

    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for attempt in 1..=SHORT_CODE_RETRY_BUDGET {
            let code = self.code_generator.generate(self.code_length);

            if !self.link_repository.exists_short_code(&code).await? {
                return Ok(code);
            }

            tracing::debug!(attempt, short_code = %code, "short code collision");
        }

        tracing::error!(
            attempts = SHORT_CODE_RETRY_BUDGET,
            code_length = self.code_length,
            "failed to generate unique short code"
        );

        Err(AppError::retries_exhausted(
            "Failed to generate unique short code",
            json!({ "attempts": SHORT_CODE_RETRY_BUDGET }),
        ))
    }
}
