//! Authentication route tests

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use pretty_assertions::assert_eq;
use rstest::*;
use serde_json::{Value, json};

use super::helpers::{create_test_app, get, post_json, send};

async fn me(app: &axum::Router, authorization: Option<&str>) -> super::helpers::TestResponse {
    let mut builder = Request::builder().uri("/api/auth/me");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

#[tokio::test]
async fn test_signup_then_me() {
    let app = create_test_app();

    let response = post_json(
        &app,
        "/api/auth/signup",
        json!({"email": "ama@example.com", "password": "secret", "displayName": "Ama"}),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["message"], "User created successfully");
    assert_eq!(response.body["user"]["email"], "ama@example.com");
    assert_eq!(response.body["user"]["displayName"], "Ama");

    let uid = response.body["user"]["uid"].as_str().unwrap().to_string();
    let token = response.body["token"].as_str().unwrap().to_string();
    assert!(!uid.is_empty());

    let response = me(&app, Some(&format!("Bearer {token}"))).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({"user": {"email": "ama@example.com", "uid": uid}})
    );
}

#[tokio::test]
async fn test_duplicate_signup_conflicts() {
    let app = create_test_app();
    let body = json!({"email": "kofi@example.com", "password": "pw"});

    post_json(&app, "/api/auth/signup", body.clone()).await;
    let response = post_json(&app, "/api/auth/signup", body).await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "EMAIL_EXISTS");
}

#[rstest]
#[case("/api/auth/signup", json!({"email": "a@example.com"}))]
#[case("/api/auth/signup", json!({"password": "pw"}))]
#[case("/api/auth/signup", json!({"email": "", "password": "pw"}))]
#[case("/api/auth/login", json!({"email": "a@example.com"}))]
#[case("/api/auth/login", json!({}))]
#[tokio::test]
async fn test_missing_credentials(#[case] uri: &str, #[case] body: Value) {
    let app = create_test_app();

    let response = post_json(&app, uri, body).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "MISSING_FIELDS");
}

#[tokio::test]
async fn test_login_issues_token_without_uid_for_unknown_email() {
    let app = create_test_app();

    let response = post_json(
        &app,
        "/api/auth/login",
        json!({"email": "guest@example.com", "password": "anything"}),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Login successful");
    assert_eq!(response.body["user"], json!({"email": "guest@example.com"}));

    let token = response.body["token"].as_str().unwrap().to_string();
    let response = me(&app, Some(&format!("Bearer {token}"))).await;
    assert_eq!(response.body, json!({"user": {"email": "guest@example.com"}}));
}

#[tokio::test]
async fn test_login_carries_uid_for_registered_user() {
    let app = create_test_app();
    let signup = post_json(
        &app,
        "/api/auth/signup",
        json!({"email": "zola@example.com", "password": "pw"}),
    )
    .await;

    let login = post_json(
        &app,
        "/api/auth/login",
        json!({"email": "zola@example.com", "password": "pw"}),
    )
    .await;
    let token = login.body["token"].as_str().unwrap().to_string();

    let response = me(&app, Some(&format!("Bearer {token}"))).await;
    assert_eq!(response.body["user"]["uid"], signup.body["user"]["uid"]);
}

#[rstest]
#[case(None, "NO_TOKEN")]
#[case(Some("Basic dXNlcjpwdw=="), "NO_TOKEN")]
#[case(Some("Bearer not-a-jwt"), "INVALID_TOKEN")]
#[tokio::test]
async fn test_me_rejects_missing_or_bad_token(
    #[case] authorization: Option<&str>,
    #[case] code: &str,
) {
    let app = create_test_app();

    let response = me(&app, authorization).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), code);
}

#[tokio::test]
async fn test_logout_acknowledges() {
    let app = create_test_app();

    let response = post_json(&app, "/api/auth/logout", json!({})).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"message": "Logout successful"}));
}

#[tokio::test]
async fn test_module_root() {
    let app = create_test_app();

    let response = get(&app, "/api/auth").await;

    assert_eq!(response.body["message"], "Auth module");
    assert_eq!(response.body["endpoints"][0], "POST /api/auth/signup");
    assert_eq!(response.body["endpoints"][3], "GET /api/auth/me");
}
