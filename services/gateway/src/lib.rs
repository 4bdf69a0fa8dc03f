//! AfriSwap API Gateway
//!
//! HTTP front door for the AfriSwap backend. Features:
//! - Multi-currency wallets with exact decimal balances
//! - Currency conversion trades
//! - Email sign-up and JWT bearer tokens
//! - Offline trade assistant
//! - Rate limiting, CORS and request tracing

#![allow(missing_docs)]

use anyhow::Result;

pub mod advisory;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod rate_limiter;
pub mod server;

pub use config::{CorsConfig, GatewayConfig, MonitoringConfig, RateLimitConfig, ServerConfig};
pub use error::ApiError;
pub use server::{ApiGatewayServer, AppState, build_router};

/// Start the gateway and serve until shutdown
pub async fn start_server(config: GatewayConfig) -> Result<()> {
    ApiGatewayServer::new(config).start().await
}
