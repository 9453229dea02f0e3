//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkId};
use crate::domain::repositories::search::{SearchParams, SearchResult};
use crate::error::AppError;
use async_trait::async_trait;

/// Fields a link search may sort by. Anything else falls back to
/// `created_at` descending.
pub const LINK_SORTABLE_FIELDS: &[&str] = &["created_at", "clicks"];

/// Repository interface for managing short links.
///
/// "Active" below means `deleted_at` is unset. Lookups that serve public
/// traffic see active links only; [`find_by_short_code`] and
/// [`exists_short_code`] see every stored link so that a code is never
/// handed out twice.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryLinkRepository`] - process-local implementation
/// - Test mocks available with `cfg(test)`
///
/// [`find_by_short_code`]: LinkRepository::find_by_short_code
/// [`exists_short_code`]: LinkRepository::exists_short_code
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Stores a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the id or short code is already taken.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, link: &Link) -> Result<(), AppError>;

    /// Replaces the stored state of an existing link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update(&self, link: &Link) -> Result<(), AppError>;

    /// Finds a link by id, deleted or not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_id(&self, id: LinkId) -> Result<Option<Link>, AppError>;

    /// Finds an active link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_alias(&self, alias: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by short code, deleted or not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<Link>, AppError>;

    /// Returns true if any stored link, deleted or not, uses `short_code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn exists_short_code(&self, short_code: &str) -> Result<bool, AppError>;

    /// Lists the active links of `owner_id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_all_by_owner(&self, owner_id: &str) -> Result<Vec<Link>, AppError>;

    /// Finds the active link `owner_id` created for `original_url`, if any.
    ///
    /// Used to refuse shortening the same URL twice for one user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_original_url_and_owner_id(
        &self,
        original_url: &str,
        owner_id: &str,
    ) -> Result<Option<Link>, AppError>;

    /// Lists every active link, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_all(&self) -> Result<Vec<Link>, AppError>;

    /// Soft-deletes a link. Deleting an already deleted link keeps its
    /// original `deleted_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, id: LinkId) -> Result<(), AppError>;

    /// Fields [`search`](LinkRepository::search) can sort by.
    fn sortable_fields(&self) -> &'static [&'static str];

    /// Filters, sorts and paginates every stored link, deleted ones included.
    ///
    /// The filter is a case-insensitive substring match on `original_url`.
    /// Without a sort field (or with one outside
    /// [`sortable_fields`](LinkRepository::sortable_fields)) results are ordered
    /// by `created_at` descending; the result still echoes the requested sort.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn search(&self, params: SearchParams) -> Result<SearchResult<Link>, AppError>;
}
