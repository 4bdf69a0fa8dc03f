//! Test helpers and utilities

use afriswap_gateway::{AppState, GatewayConfig, build_router};
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::Value;
use std::sync::Once;
use tower::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize tracing once across all tests
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "afriswap_gateway=debug,wallet_ledger=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}

/// Test configuration: deterministic output, generous rate limits
pub fn create_test_config() -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.server.compression = false;
    config.monitoring.tracing_enabled = false;
    config.auth.jwt_secret = "test-secret-key".to_string();
    config.rate_limiting.requests_per_minute = 100_000;
    config.rate_limiting.burst_size = 10_000;
    config.rate_limiting.global_requests_per_minute = 1_000_000;
    config.rate_limiting.global_burst_size = 100_000;
    config
}

pub fn create_test_app() -> Router {
    app_with(&create_test_config())
}

pub fn app_with(config: &GatewayConfig) -> Router {
    init_test_env();
    build_router(AppState::new(config), config)
}

/// Decoded response; `body` is `Null` when it is not JSON
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub text: String,
}

impl TestResponse {
    /// `error.code` from the error envelope
    pub fn error_code(&self) -> &str {
        self.body["error"]["code"].as_str().unwrap_or_default()
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        headers,
        body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
        text: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> TestResponse {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> TestResponse {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn send_json(app: &Router, method: Method, uri: &str, body: Value) -> TestResponse {
    send(
        app,
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// POST with an arbitrary body and content type
pub async fn post_raw(
    app: &Router,
    uri: &str,
    content_type: Option<&str>,
    body: &'static str,
) -> TestResponse {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    send(app, builder.body(Body::from(body)).unwrap()).await
}
