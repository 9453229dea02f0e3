mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
    routing::get,
};
use axum_test::TestServer;
use serde_json::Value;
use short_urls::api::handlers::health_handler;
use short_urls::routes::app_router;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_endpoint_success() {
    let state = common::create_test_state();
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["storage"]["status"], "ok");
    assert_eq!(json["checks"]["storage"]["message"], "memory");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_app_router_trims_trailing_slash() {
    let app = app_router(common::create_test_state(), false);

    let response = app
        .oneshot(Request::get("/health/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_app_router_rate_limits_writes_per_forwarded_ip() {
    let app = app_router(common::create_test_state(), true);

    let shorten = |ip: &str| {
        Request::post("/urls")
            .header("content-type", "application/json")
            .header("x-forwarded-for", ip)
            .body(Body::from(r#"{"url":"https://example.com"}"#))
            .unwrap()
    };

    let mut statuses = Vec::new();
    for _ in 0..31 {
        let response = app.clone().oneshot(shorten("203.0.113.7")).await.unwrap();
        statuses.push(response.status());
    }

    assert!(statuses[..30].iter().all(|s| *s == StatusCode::CREATED));
    assert_eq!(statuses[30], StatusCode::TOO_MANY_REQUESTS);

    let other = app.clone().oneshot(shorten("198.51.100.1")).await.unwrap();
    assert_eq!(other.status(), StatusCode::CREATED);
}
