//! Health, landing page, fallback and assistant tests

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use pretty_assertions::assert_eq;
use serde_json::json;

use super::helpers::{app_with, create_test_app, create_test_config, get, post_json, send};

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();

    let response = get(&app, "/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "OK");
    let timestamp = response.body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    assert!(timestamp.ends_with('Z'));
}

#[tokio::test]
async fn test_health_path_is_configurable() {
    let mut config = create_test_config();
    config.monitoring.health_path = "/healthz".to_string();
    let app = app_with(&config);

    assert_eq!(get(&app, "/healthz").await.status, StatusCode::OK);
    assert_eq!(get(&app, "/health").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_html_pages() {
    let app = create_test_app();

    for uri in ["/", "/api-docs"] {
        let response = get(&app, uri).await;
        assert_eq!(response.status, StatusCode::OK);
        let content_type = response.headers[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
        assert!(response.text.contains("AfriSwap"));
    }
}

#[tokio::test]
async fn test_unknown_route_uses_error_envelope() {
    let app = create_test_app();

    let response = get(&app, "/api/nothing-here").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body,
        json!({"error": {"message": "Not Found", "code": "NOT_FOUND"}})
    );
}

#[tokio::test]
async fn test_wrong_method_uses_error_envelope() {
    let app = create_test_app();

    let response = send(
        &app,
        Request::builder()
            .method(Method::DELETE)
            .uri("/api/wallet/u1")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.error_code(), "METHOD_NOT_ALLOWED");
    assert!(response.headers.contains_key(header::ALLOW));
}

#[tokio::test]
async fn test_undecodable_path_uses_error_envelope() {
    let app = create_test_app();

    let wallet = get(&app, "/api/wallet/%FF").await;
    assert_eq!(wallet.status, StatusCode::BAD_REQUEST);
    assert_eq!(wallet.error_code(), "INVALID_PATH");

    let trade = get(&app, "/api/trades/%FF").await;
    assert_eq!(trade.status, StatusCode::BAD_REQUEST);
    assert_eq!(trade.error_code(), "INVALID_PATH");
}

#[tokio::test]
async fn test_security_headers_present() {
    let app = create_test_app();

    let response = get(&app, "/health").await;

    assert_eq!(response.headers["x-content-type-options"], "nosniff");
    assert_eq!(response.headers["x-frame-options"], "SAMEORIGIN");
    assert_eq!(response.headers["referrer-policy"], "no-referrer");
}

#[tokio::test]
async fn test_assistant_answers() {
    let app = create_test_app();

    let response = post_json(
        &app,
        "/api/ai/assistant",
        json!({
            "question": "What fees apply when I send money to Kenya?",
            "context": {"userId": "u1", "country": "Nigeria"}
        }),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body["answer"].as_str().unwrap().is_empty());
    assert!(!response.body["suggestions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_assistant_requires_question() {
    let app = create_test_app();

    let response = post_json(&app, "/api/ai/assistant", json!({"question": "  "})).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "MISSING_FIELDS");

    let root = get(&app, "/api/ai").await;
    assert_eq!(root.body["message"], "AI module");
}

#[tokio::test]
async fn test_rate_prediction() {
    let app = create_test_app();

    let response = post_json(
        &app,
        "/api/ai/rate-prediction",
        json!({
            "fromCurrency": "GHS",
            "toCurrency": "NGN",
            "historicalData": [10, 11, 12, 13, 14]
        }),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({"predictedRate": 15, "confidence": 0.9})
    );
}

#[tokio::test]
async fn test_rate_prediction_validation() {
    let app = create_test_app();

    let missing = post_json(
        &app,
        "/api/ai/rate-prediction",
        json!({"fromCurrency": "GHS", "toCurrency": "NGN", "historicalData": []}),
    )
    .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.error_code(), "MISSING_FIELDS");

    let negative = post_json(
        &app,
        "/api/ai/rate-prediction",
        json!({"fromCurrency": "GHS", "toCurrency": "NGN", "historicalData": [12, -1]}),
    )
    .await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);
    assert_eq!(negative.error_code(), "INVALID_RATE");
}
