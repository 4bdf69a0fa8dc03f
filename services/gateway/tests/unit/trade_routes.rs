//! Trade route tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::*;
use serde_json::{Value, json};

use super::helpers::{create_test_app, get, post_json, put_json};

fn trade_body(user: &str, amount: Value, rate: Option<Value>) -> Value {
    let mut body = json!({
        "userId": user,
        "fromCurrency": "USD",
        "toCurrency": "GHS",
        "amount": amount,
    });
    if let Some(rate) = rate {
        body["exchangeRate"] = rate;
    }
    body
}

#[tokio::test]
async fn test_create_and_fetch_trade() {
    let app = create_test_app();

    let response = post_json(&app, "/api/trades", trade_body("u1", json!(100), Some(json!(12.5)))).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["message"], "Trade created");

    let trade = &response.body["trade"];
    assert_eq!(trade["id"], 1);
    assert_eq!(trade["userId"], "u1");
    assert_eq!(trade["status"], "pending");
    assert_eq!(trade["convertedAmount"], 1250);
    assert_eq!(trade["createdAt"], trade["updatedAt"]);

    let fetched = get(&app, "/api/trades/1").await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, json!({"trade": trade.clone()}));
}

#[rstest]
#[case(None)]
#[case(Some(json!(0)))]
#[tokio::test]
async fn test_exchange_rate_defaults_to_one(#[case] rate: Option<Value>) {
    let app = create_test_app();

    let response = post_json(&app, "/api/trades", trade_body("u1", json!(40), rate)).await;

    assert_eq!(response.body["trade"]["exchangeRate"], 1);
    assert_eq!(response.body["trade"]["convertedAmount"], 40);
}

#[rstest]
#[case(trade_body("", json!(10), None), "MISSING_FIELDS")]
#[case(trade_body("u1", json!(0), None), "MISSING_FIELDS")]
#[case(json!({"userId": "u1", "fromCurrency": "USD", "amount": 10}), "MISSING_FIELDS")]
#[case(trade_body("u1", json!(-10), None), "INVALID_AMOUNT")]
#[case(trade_body("u1", json!(10), Some(json!(-2))), "INVALID_AMOUNT")]
#[tokio::test]
async fn test_create_rejections(#[case] body: Value, #[case] code: &str) {
    let app = create_test_app();

    let response = post_json(&app, "/api/trades", body).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), code);

    let listing = get(&app, "/api/trades").await;
    assert_eq!(listing.body["count"], 0);
}

#[tokio::test]
async fn test_list_filters() {
    let app = create_test_app();
    post_json(&app, "/api/trades", trade_body("u1", json!(10), None)).await;
    post_json(&app, "/api/trades", trade_body("u2", json!(20), None)).await;
    post_json(&app, "/api/trades", trade_body("u1", json!(30), None)).await;
    put_json(&app, "/api/trades/3", json!({"status": "completed"})).await;

    let all = get(&app, "/api/trades").await;
    assert_eq!(all.body["message"], "Trades");
    assert_eq!(all.body["count"], 3);

    let mine = get(&app, "/api/trades?userId=u1").await;
    assert_eq!(mine.body["count"], 2);

    let done = get(&app, "/api/trades?userId=u1&status=completed").await;
    assert_eq!(done.body["count"], 1);
    assert_eq!(done.body["trades"][0]["id"], 3);

    let unfiltered = get(&app, "/api/trades?userId=&status=").await;
    assert_eq!(unfiltered.body["count"], 3);
}

#[tokio::test]
async fn test_list_rejects_unknown_status() {
    let app = create_test_app();

    let response = get(&app, "/api/trades?status=settled").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_STATUS");
}

#[tokio::test]
async fn test_update_recomputes_conversion() {
    let app = create_test_app();
    post_json(&app, "/api/trades", trade_body("u1", json!(200), Some(json!(1.5)))).await;

    let response = put_json(
        &app,
        "/api/trades/1",
        json!({"status": "completed", "exchangeRate": 2}),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Trade updated");
    assert_eq!(response.body["trade"]["status"], "completed");
    assert_eq!(response.body["trade"]["exchangeRate"], 2);
    assert_eq!(response.body["trade"]["convertedAmount"], 400);
}

#[rstest]
#[case(json!({"status": "settled"}), "INVALID_STATUS")]
#[case(json!({"exchangeRate": -1}), "INVALID_AMOUNT")]
#[tokio::test]
async fn test_update_rejections(#[case] body: Value, #[case] code: &str) {
    let app = create_test_app();
    post_json(&app, "/api/trades", trade_body("u1", json!(10), None)).await;

    let response = put_json(&app, "/api/trades/1", body).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), code);

    let trade = get(&app, "/api/trades/1").await;
    assert_eq!(trade.body["trade"]["status"], "pending");
}

#[rstest]
#[case("/api/trades/42")]
#[case("/api/trades/abc")]
#[case("/api/trades/-1")]
#[tokio::test]
async fn test_unknown_trade_not_found(#[case] uri: &str) {
    let app = create_test_app();

    let fetched = get(&app, uri).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
    assert_eq!(fetched.error_code(), "NOT_FOUND");

    let updated = put_json(&app, uri, json!({"status": "completed"})).await;
    assert_eq!(updated.status, StatusCode::NOT_FOUND);
}
