//! Health check, landing page and fallback handlers

use axum::response::{Html, Json};
use chrono::Utc;
use services_common::serde_helpers::iso_millis;

use crate::{error::ApiError, models::HealthResponse};

/// Liveness probe
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: iso_millis::format(&Utc::now()),
    })
}

pub async fn landing_page() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

pub async fn api_docs() -> Html<&'static str> {
    Html(API_DOCS)
}

/// Any route nothing else matched
pub async fn not_found() -> ApiError {
    ApiError::not_found()
}

const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>AfriSwap Backend</title></head>
<body>
<h1>AfriSwap Backend</h1>
<p>Cross-border payments and currency exchange API.</p>
<ul>
<li><a href="/health">Health check</a></li>
<li><a href="/api-docs">API documentation</a></li>
</ul>
</body>
</html>
"#;

const API_DOCS: &str = r#"<!DOCTYPE html>
<html>
<head><title>AfriSwap API</title></head>
<body>
<h1>AfriSwap API</h1>
<ul>
<li><code>/api/auth</code> - signup, login, logout, current user</li>
<li><code>/api/wallet</code> - balances, deposits, withdrawals</li>
<li><code>/api/trades</code> - currency conversion trades</li>
<li><code>/api/ai</code> - trade assistant</li>
</ul>
</body>
</html>
"#;
