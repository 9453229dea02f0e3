//! Process-local implementation of link repository.

use async_trait::async_trait;
use serde_json::json;
use std::cmp::Ordering;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, LinkId, LinkProps};
use crate::domain::repositories::{
    LINK_SORTABLE_FIELDS, LinkRepository, SearchParams, SearchResult, SortDirection,
};
use crate::error::AppError;
use crate::infrastructure::memory::searchable::{Searchable, search_in_memory};

impl Searchable for Link {
    fn matches_filter(&self, filter: &str) -> bool {
        self.original_url()
            .to_lowercase()
            .contains(&filter.to_lowercase())
    }

    fn compare_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "clicks" => self.clicks().cmp(&other.clicks()),
            _ => self.created_at().cmp(&other.created_at()),
        }
    }
}

/// Links kept in a vector, in insertion order.
///
/// Stored links are clones; callers never share state with the store.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    items: RwLock<Vec<Link>>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(id: LinkId) -> AppError {
        AppError::not_found("Short URL not found", json!({ "id": id }))
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert(&self, link: &Link) -> Result<(), AppError> {
        let mut items = self.items.write().await;

        if items
            .iter()
            .any(|stored| stored.id() == link.id() || stored.short_code() == link.short_code())
        {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "links_short_code_key" }),
            ));
        }

        items.push(link.clone());
        Ok(())
    }

    async fn update(&self, link: &Link) -> Result<(), AppError> {
        let mut items = self.items.write().await;

        let stored = items
            .iter_mut()
            .find(|stored| stored.id() == link.id())
            .ok_or_else(|| Self::not_found(link.id()))?;

        // A stored deletion is never cleared, whatever state the caller holds.
        *stored = match stored.deleted_at() {
            Some(deleted_at) if !link.is_deleted() => Link::with_id(
                link.id(),
                LinkProps {
                    deleted_at: Some(deleted_at),
                    ..link.to_props()
                },
            )?,
            _ => link.clone(),
        };

        Ok(())
    }

    async fn find_by_id(&self, id: LinkId) -> Result<Option<Link>, AppError> {
        let items = self.items.read().await;
        Ok(items.iter().find(|link| link.id() == id).cloned())
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<Link>, AppError> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .find(|link| link.short_code() == alias && !link.is_deleted())
            .cloned())
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .find(|link| link.short_code() == short_code)
            .cloned())
    }

    async fn exists_short_code(&self, short_code: &str) -> Result<bool, AppError> {
        let items = self.items.read().await;
        Ok(items.iter().any(|link| link.short_code() == short_code))
    }

    async fn find_all_by_owner(&self, owner_id: &str) -> Result<Vec<Link>, AppError> {
        let items = self.items.read().await;

        let mut links: Vec<Link> = items
            .iter()
            .filter(|link| link.is_owned_by(owner_id) && !link.is_deleted())
            .cloned()
            .collect();
        links.sort_by_key(Link::created_at);

        Ok(links)
    }

    async fn find_by_original_url_and_owner_id(
        &self,
        original_url: &str,
        owner_id: &str,
    ) -> Result<Option<Link>, AppError> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .find(|link| {
                link.original_url() == original_url
                    && link.is_owned_by(owner_id)
                    && !link.is_deleted()
            })
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Link>, AppError> {
        let items = self.items.read().await;

        let mut links: Vec<Link> = items
            .iter()
            .filter(|link| !link.is_deleted())
            .cloned()
            .collect();
        links.sort_by_key(Link::created_at);

        Ok(links)
    }

    async fn delete(&self, id: LinkId) -> Result<(), AppError> {
        let mut items = self.items.write().await;

        let stored = items
            .iter_mut()
            .find(|link| link.id() == id)
            .ok_or_else(|| Self::not_found(id))?;

        stored.soft_delete();
        Ok(())
    }

    fn sortable_fields(&self) -> &'static [&'static str] {
        LINK_SORTABLE_FIELDS
    }

    async fn search(&self, params: SearchParams) -> Result<SearchResult<Link>, AppError> {
        let items = self.items.read().await;

        Ok(search_in_memory(
            &items,
            params,
            self.sortable_fields(),
            ("created_at", SortDirection::Desc),
        ))
    }
}
