//! Rate limiting and CORS behaviour at the router level

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use pretty_assertions::assert_eq;

use super::helpers::{TestResponse, app_with, create_test_config, send};

async fn health_from(app: &axum::Router, client: &str) -> TestResponse {
    send(
        app,
        Request::builder()
            .uri("/health")
            .header("X-Forwarded-For", client)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

#[tokio::test]
async fn test_client_over_quota_gets_429() {
    let mut config = create_test_config();
    config.rate_limiting.requests_per_minute = 1;
    config.rate_limiting.burst_size = 2;
    let app = app_with(&config);

    assert_eq!(health_from(&app, "203.0.113.9").await.status, StatusCode::OK);
    assert_eq!(health_from(&app, "203.0.113.9").await.status, StatusCode::OK);

    let limited = health_from(&app, "203.0.113.9").await;
    assert_eq!(limited.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(limited.error_code(), "RATE_LIMITED");
}

#[tokio::test]
async fn test_limited_client_does_not_block_others() {
    let mut config = create_test_config();
    config.rate_limiting.requests_per_minute = 1;
    config.rate_limiting.burst_size = 2;
    let app = app_with(&config);

    for _ in 0..2 {
        assert_eq!(health_from(&app, "203.0.113.9").await.status, StatusCode::OK);
    }
    for _ in 0..3 {
        let limited = health_from(&app, "203.0.113.9").await;
        assert_eq!(limited.status, StatusCode::TOO_MANY_REQUESTS);
    }

    assert_eq!(health_from(&app, "198.51.100.4").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_global_quota_shared_by_all_clients() {
    let mut config = create_test_config();
    config.rate_limiting.global_requests_per_minute = 1;
    config.rate_limiting.global_burst_size = 2;
    let app = app_with(&config);

    assert_eq!(health_from(&app, "203.0.113.1").await.status, StatusCode::OK);
    assert_eq!(health_from(&app, "203.0.113.2").await.status, StatusCode::OK);

    let limited = health_from(&app, "203.0.113.3").await;
    assert_eq!(limited.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(limited.error_code(), "RATE_LIMITED");
}

#[tokio::test]
async fn test_disabled_rate_limiting() {
    let mut config = create_test_config();
    config.rate_limiting.enabled = false;
    config.rate_limiting.requests_per_minute = 1;
    config.rate_limiting.burst_size = 1;
    let app = app_with(&config);

    for _ in 0..5 {
        assert_eq!(health_from(&app, "203.0.113.9").await.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let app = app_with(&create_test_config());

    let response = send(
        &app,
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/wallet/u1/deposit")
            .header(header::ORIGIN, "https://app.afriswap.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_cors_restricted_origin_list() {
    let mut config = create_test_config();
    config.cors.allowed_origins = vec!["https://app.afriswap.example".to_string()];
    config.cors.allow_credentials = true;
    let app = app_with(&config);

    let response = send(
        &app,
        Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "https://app.afriswap.example")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(
        response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://app.afriswap.example"
    );
    assert_eq!(
        response.headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );
}
