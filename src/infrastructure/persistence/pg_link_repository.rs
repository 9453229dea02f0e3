//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Link, LinkId, LinkProps};
use crate::domain::repositories::{
    LINK_SORTABLE_FIELDS, LinkRepository, SearchParams, SearchResult, SortDirection,
};
use crate::error::AppError;

const LINK_COLUMNS: &str =
    "id, original_url, short_code, owner_id, clicks, created_at, updated_at, deleted_at";

#[derive(Debug, sqlx::FromRow)]
struct LinkRow {
    id: Uuid,
    original_url: String,
    short_code: String,
    owner_id: Option<String>,
    clicks: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl LinkRow {
    /// Rebuilds the entity, re-running its validation.
    fn into_link(self) -> Result<Link, AppError> {
        let id = self.id;
        let props = LinkProps {
            original_url: self.original_url,
            short_code: self.short_code,
            owner_id: self.owner_id,
            clicks: Some(self.clicks),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
            deleted_at: self.deleted_at,
        };

        Link::with_id(id, props).map_err(|e| {
            tracing::error!(link_id = %id, errors = ?e.errors(), "stored link failed validation");
            AppError::internal("Stored link is invalid", json!({ "id": id }))
        })
    }
}

fn into_links(rows: Vec<LinkRow>) -> Result<Vec<Link>, AppError> {
    rows.into_iter().map(LinkRow::into_link).collect()
}

/// Escapes `LIKE` wildcards so the filter matches literally.
fn like_pattern(filter: &str) -> String {
    let escaped = filter
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: Option<&String>) {
    if let Some(filter) = filter {
        builder
            .push(" WHERE original_url ILIKE ")
            .push_bind(like_pattern(filter));
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Uses runtime-checked SQLx queries with bound parameters. The search ORDER
/// BY is assembled from the sortable-field allow-list only, never from
/// caller input.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn fetch_optional(
        &self,
        condition: &str,
        value: &str,
    ) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE {condition}");

        sqlx::query_as::<_, LinkRow>(&sql)
            .bind(value)
            .fetch_optional(self.pool.as_ref())
            .await?
            .map(LinkRow::into_link)
            .transpose()
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, link: &Link) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO links
                (id, original_url, short_code, owner_id, clicks, created_at, updated_at, deleted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(link.id())
        .bind(link.original_url())
        .bind(link.short_code())
        .bind(link.owner_id())
        .bind(link.clicks())
        .bind(link.created_at())
        .bind(link.updated_at())
        .bind(link.deleted_at())
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn update(&self, link: &Link) -> Result<(), AppError> {
        // A stored deletion is never cleared, whatever state the caller holds.
        let result = sqlx::query(
            r#"
            UPDATE links
            SET original_url = $2,
                clicks = $3,
                updated_at = $4,
                deleted_at = COALESCE(deleted_at, $5)
            WHERE id = $1
            "#,
        )
        .bind(link.id())
        .bind(link.original_url())
        .bind(link.clicks())
        .bind(link.updated_at())
        .bind(link.deleted_at())
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Short URL not found",
                json!({ "id": link.id() }),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: LinkId) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE id = $1");

        sqlx::query_as::<_, LinkRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .map(LinkRow::into_link)
            .transpose()
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<Link>, AppError> {
        self.fetch_optional("short_code = $1 AND deleted_at IS NULL", alias)
            .await
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        self.fetch_optional("short_code = $1", short_code).await
    }

    async fn exists_short_code(&self, short_code: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM links WHERE short_code = $1)",
        )
        .bind(short_code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn find_all_by_owner(&self, owner_id: &str) -> Result<Vec<Link>, AppError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links \
             WHERE owner_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at ASC, id ASC"
        );

        let rows = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(owner_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        into_links(rows)
    }

    async fn find_by_original_url_and_owner_id(
        &self,
        original_url: &str,
        owner_id: &str,
    ) -> Result<Option<Link>, AppError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links \
             WHERE original_url = $1 AND owner_id = $2 AND deleted_at IS NULL \
             ORDER BY created_at ASC LIMIT 1"
        );

        sqlx::query_as::<_, LinkRow>(&sql)
            .bind(original_url)
            .bind(owner_id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .map(LinkRow::into_link)
            .transpose()
    }

    async fn find_all(&self) -> Result<Vec<Link>, AppError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE deleted_at IS NULL ORDER BY created_at ASC, id ASC"
        );

        let rows = sqlx::query_as::<_, LinkRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        into_links(rows)
    }

    async fn delete(&self, id: LinkId) -> Result<(), AppError> {
        let result =
            sqlx::query("UPDATE links SET deleted_at = COALESCE(deleted_at, now()) WHERE id = $1")
                .bind(id)
                .execute(self.pool.as_ref())
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Short URL not found",
                json!({ "id": id }),
            ));
        }

        Ok(())
    }

    fn sortable_fields(&self) -> &'static [&'static str] {
        LINK_SORTABLE_FIELDS
    }

    async fn search(&self, params: SearchParams) -> Result<SearchResult<Link>, AppError> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM links");
        push_filter(&mut count_query, params.filter());

        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.as_ref())
            .await?;

        let (column, direction) = params.effective_sort(
            self.sortable_fields(),
            ("created_at", SortDirection::Desc),
        );
        let direction = match direction {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        };

        let mut page_query = QueryBuilder::<Postgres>::new(format!("SELECT {LINK_COLUMNS} FROM links"));
        push_filter(&mut page_query, params.filter());
        page_query
            .push(format!(" ORDER BY {column} {direction}, id ASC"))
            .push(" LIMIT ")
            .push_bind(i64::try_from(params.per_page()).unwrap_or(i64::MAX))
            .push(" OFFSET ")
            .push_bind(i64::try_from(params.offset()).unwrap_or(i64::MAX));

        let rows = page_query
            .build_query_as::<LinkRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(SearchResult::new(into_links(rows)?, total as u64, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("example"), "%example%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_invalid_row_maps_to_internal() {
        let now = Utc::now();
        let row = LinkRow {
            id: Uuid::new_v4(),
            original_url: "not a url".to_string(),
            short_code: "abc".to_string(),
            owner_id: None,
            clicks: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let err = row.into_link().unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }
}
