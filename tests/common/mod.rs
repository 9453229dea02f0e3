#![allow(dead_code)]

use axum::{Router, middleware};
use axum_test::TestServer;
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;

use short_urls::api::middleware::auth;
use short_urls::api::routes::url_routes;
use short_urls::application::services::AuthService;
use short_urls::domain::entities::User;
use short_urls::infrastructure::memory::InMemoryUserRepository;
use short_urls::state::AppState;

pub const BASE_URL: &str = "http://short.test";
pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const ALICE: &str = "alice";
pub const BOB: &str = "bob";

/// In-memory state with two known users.
pub fn create_test_state() -> AppState {
    let users = InMemoryUserRepository::with_users([
        User::new(ALICE.to_string(), "Alice".to_string(), Utc::now()),
        User::new(BOB.to_string(), "Bob".to_string(), Utc::now()),
    ]);

    AppState::in_memory(
        Arc::new(users),
        AuthService::new(SIGNING_SECRET),
        BASE_URL,
        6,
    )
}

/// `/urls` routes with identity resolution, without rate limiting.
pub fn url_app(state: AppState) -> Router {
    url_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .with_state(state)
}

pub fn test_server() -> TestServer {
    TestServer::new(url_app(create_test_state())).unwrap()
}

pub fn token_for(user_id: &str) -> String {
    AuthService::new(SIGNING_SECRET).issue_token(user_id)
}

/// Last path segment of a presented short URL.
pub fn code_of(short_url: &str) -> String {
    short_url.rsplit('/').next().unwrap().to_string()
}

pub async fn create_test_user(pool: &PgPool, id: &str) {
    sqlx::query("INSERT INTO users (id, name) VALUES ($1, $2)")
        .bind(id)
        .bind(format!("user {id}"))
        .execute(pool)
        .await
        .unwrap();
}
