mod common;

use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use short_urls::domain::entities::{Link, LinkProps};
use short_urls::domain::repositories::{LinkRepository, SearchInput, SearchParams};
use short_urls::error::AppError;
use short_urls::infrastructure::persistence::PgLinkRepository;

fn link(url: &str, code: &str, owner: Option<&str>) -> Link {
    Link::new(LinkProps::new(url, code).owned_by(owner.map(str::to_string))).unwrap()
}

fn link_with(url: &str, code: &str, clicks: i64, minutes_ago: i64) -> Link {
    let created_at = Utc::now() - Duration::minutes(minutes_ago);
    Link::new(LinkProps {
        clicks: Some(clicks),
        created_at: Some(created_at),
        updated_at: Some(created_at),
        ..LinkProps::new(url, code)
    })
    .unwrap()
}

#[sqlx::test]
async fn test_insert_and_find(pool: PgPool) {
    common::create_test_user(&pool, "alice").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = link("https://example.com", "abc123", Some("alice"));
    repo.insert(&link).await.unwrap();

    let by_id = repo.find_by_id(link.id()).await.unwrap().unwrap();
    assert_eq!(by_id.short_code(), "abc123");
    assert_eq!(by_id.owner_id(), Some("alice"));
    assert_eq!(by_id.clicks(), 0);

    let by_alias = repo.find_by_alias("abc123").await.unwrap().unwrap();
    assert_eq!(by_alias.id(), link.id());

    assert!(repo.exists_short_code("abc123").await.unwrap());
    assert!(!repo.exists_short_code("zzz999").await.unwrap());
}

#[sqlx::test]
async fn test_duplicate_short_code_conflicts(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert(&link("https://a.example", "dup1", None))
        .await
        .unwrap();
    let err = repo
        .insert(&link("https://b.example", "dup1", None))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
}

#[sqlx::test]
async fn test_deleted_links_hidden_from_active_lookups(pool: PgPool) {
    common::create_test_user(&pool, "alice").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = link("https://example.com", "gone1", Some("alice"));
    repo.insert(&link).await.unwrap();
    repo.delete(link.id()).await.unwrap();

    assert!(repo.find_by_alias("gone1").await.unwrap().is_none());
    assert!(repo.find_all_by_owner("alice").await.unwrap().is_empty());
    assert!(
        repo.find_by_original_url_and_owner_id("https://example.com", "alice")
            .await
            .unwrap()
            .is_none()
    );
    assert!(repo.find_all().await.unwrap().is_empty());

    let stored = repo.find_by_short_code("gone1").await.unwrap().unwrap();
    assert!(stored.is_deleted());
    assert!(repo.exists_short_code("gone1").await.unwrap());
}

#[sqlx::test]
async fn test_update_persists_state_and_keeps_deletion(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let mut link = link("https://old.example", "upd1", None);
    repo.insert(&link).await.unwrap();

    link.update_original_url("https://new.example").unwrap();
    link.increment_clicks();
    repo.update(&link).await.unwrap();

    let stored = repo.find_by_id(link.id()).await.unwrap().unwrap();
    assert_eq!(stored.original_url(), "https://new.example");
    assert_eq!(stored.clicks(), 1);

    repo.delete(link.id()).await.unwrap();

    // `link` still holds the pre-deletion state.
    link.increment_clicks();
    repo.update(&link).await.unwrap();

    let stored = repo.find_by_id(link.id()).await.unwrap().unwrap();
    assert!(stored.is_deleted());
    assert_eq!(stored.clicks(), 2);
}

#[sqlx::test]
async fn test_update_and_delete_missing_are_not_found(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let never_inserted = link("https://example.com", "miss1", None);

    let err = repo.update(&never_inserted).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    let err = repo.delete(never_inserted.id()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[sqlx::test]
async fn test_find_all_by_owner_oldest_first(pool: PgPool) {
    common::create_test_user(&pool, "alice").await;
    common::create_test_user(&pool, "bob").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let older = Link::new(LinkProps {
        created_at: Some(Utc::now() - Duration::hours(1)),
        ..LinkProps::new("https://one.example", "own1").owned_by(Some("alice".to_string()))
    })
    .unwrap();
    let newer = link("https://two.example", "own2", Some("alice"));
    let other = link("https://three.example", "own3", Some("bob"));

    repo.insert(&newer).await.unwrap();
    repo.insert(&older).await.unwrap();
    repo.insert(&other).await.unwrap();

    let links = repo.find_all_by_owner("alice").await.unwrap();
    let codes: Vec<&str> = links.iter().map(|l| l.short_code()).collect();
    assert_eq!(codes, vec!["own1", "own2"]);
}

#[sqlx::test]
async fn test_search_filters_sorts_and_paginates(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert(&link_with("https://Example.com/a", "s1", 5, 30))
        .await
        .unwrap();
    repo.insert(&link_with("https://example.com/b", "s2", 9, 20))
        .await
        .unwrap();
    repo.insert(&link_with("https://other.org/c", "s3", 1, 10))
        .await
        .unwrap();

    let result = repo
        .search(SearchParams::new(SearchInput {
            page: Some(1),
            per_page: Some(1),
            sort: Some("clicks".to_string()),
            sort_dir: Some("desc".to_string()),
            filter: Some("EXAMPLE".to_string()),
        }))
        .await
        .unwrap();

    assert_eq!(result.total, 2);
    assert_eq!(result.last_page, 2);
    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].short_code(), "s2");

    let second_page = repo
        .search(SearchParams::new(SearchInput {
            page: Some(2),
            per_page: Some(1),
            sort: Some("clicks".to_string()),
            sort_dir: Some("desc".to_string()),
            filter: Some("example".to_string()),
        }))
        .await
        .unwrap();
    assert_eq!(second_page.items[0].short_code(), "s1");
}

#[sqlx::test]
async fn test_search_defaults_to_newest_first_and_includes_deleted(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let old = link_with("https://a.example", "d1", 0, 30);
    let new = link_with("https://b.example", "d2", 0, 10);
    repo.insert(&old).await.unwrap();
    repo.insert(&new).await.unwrap();
    repo.delete(new.id()).await.unwrap();

    let result = repo
        .search(SearchParams::new(SearchInput {
            sort: Some("original_url".to_string()),
            ..SearchInput::default()
        }))
        .await
        .unwrap();

    let codes: Vec<&str> = result.items.iter().map(|l| l.short_code()).collect();
    assert_eq!(codes, vec!["d2", "d1"]);
    assert_eq!(result.total, 2);
    assert_eq!(result.current_page, 1);
    assert_eq!(result.per_page, 15);
    assert_eq!(result.sort.as_deref(), Some("original_url"));
}

#[sqlx::test]
async fn test_search_filter_is_literal(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert(&link("https://example.com/?q=50%25_off", "lit1", None))
        .await
        .unwrap();
    repo.insert(&link("https://example.com/plain", "lit2", None))
        .await
        .unwrap();

    let result = repo
        .search(SearchParams::new(SearchInput {
            filter: Some("%25_".to_string()),
            ..SearchInput::default()
        }))
        .await
        .unwrap();

    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].short_code(), "lit1");
}

#[sqlx::test]
async fn test_search_largest_page_is_empty(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert(&link("https://example.com", "far1", None))
        .await
        .unwrap();

    let result = repo
        .search(SearchParams::new(SearchInput {
            page: Some(i64::MAX),
            per_page: Some(15),
            ..SearchInput::default()
        }))
        .await
        .unwrap();

    assert!(result.items.is_empty());
    assert_eq!(result.total, 1);
    assert_eq!(result.last_page, 1);
}
