//! One struct per link workflow.
//!
//! Each use case receives its collaborators (repositories, code generator)
//! through its constructor and exposes a single `execute`. Collaborator type
//! parameters default to trait objects so the composition root can pick the
//! storage backend at runtime; tests plug in `mockall` mocks instead.

pub mod delete_short_url;
pub mod list_user_urls;
pub mod redirect_by_alias;
pub mod shorten_url;
pub mod update_short_url;

pub use delete_short_url::{DeleteShortUrlInput, DeleteShortUrlUseCase};
pub use list_user_urls::{ListUserUrlsInput, ListUserUrlsUseCase};
pub use redirect_by_alias::{RedirectByAliasInput, RedirectByAliasUseCase};
pub use shorten_url::{SHORT_CODE_RETRY_BUDGET, ShortenUrlInput, ShortenUrlUseCase};
pub use update_short_url::{UpdateShortUrlInput, UpdateShortUrlUseCase};

use serde_json::json;

use crate::domain::entities::{Link, LinkId};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Loads an active link and checks that `user_id` owns it.
///
/// Missing and deleted links both yield the same `NotFound`.
async fn load_owned_link<L>(repository: &L, id: LinkId, user_id: &str) -> Result<Link, AppError>
where
    L: LinkRepository + ?Sized,
{
    let link = repository
        .find_by_id(id)
        .await?
        .filter(|link| !link.is_deleted())
        .ok_or_else(|| AppError::not_found("Short URL not found", json!({ "id": id })))?;

    if !link.is_owned_by(user_id) {
        return Err(AppError::forbidden(
            "You are not allowed to modify this short URL",
            json!({}),
        ));
    }

    Ok(link)
}
