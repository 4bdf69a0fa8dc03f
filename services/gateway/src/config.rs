//! Configuration for the AfriSwap gateway
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, then `AFRISWAP__SECTION__KEY` environment variables.

use anyhow::Result;
use auth_service::AuthConfig;
use serde::{Deserialize, Serialize};
use services_common::{BYTES_PER_MB, DEFAULT_HTTP_PORT};

/// Gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Token signing configuration
    pub auth: AuthConfig,
    /// Rate limiting configuration
    pub rate_limiting: RateLimitConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Monitoring configuration
    pub monitoring: MonitoringConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
    /// Enable compression
    pub compression: bool,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    pub enabled: bool,
    /// Sustained rate per client
    pub requests_per_minute: u32,
    /// Burst capacity per client
    pub burst_size: u32,
    /// Sustained rate across all clients
    pub global_requests_per_minute: u32,
    /// Burst capacity across all clients
    pub global_burst_size: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Enable CORS
    pub enabled: bool,
    /// Allowed origins; `*` allows any
    pub allowed_origins: Vec<String>,
    /// Allowed methods
    pub allowed_methods: Vec<String>,
    /// Allowed headers
    pub allowed_headers: Vec<String>,
    /// Allow credentials (ignored with a wildcard origin)
    pub allow_credentials: bool,
    /// Max age for preflight requests
    pub max_age_seconds: u64,
}

/// Monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    /// Health check endpoint path
    pub health_path: String,
    /// Enable per-request tracing spans
    pub tracing_enabled: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: DEFAULT_HTTP_PORT,
                timeout_seconds: 30,
                max_body_size: BYTES_PER_MB,
                compression: true,
            },
            auth: AuthConfig::default(),
            rate_limiting: RateLimitConfig {
                enabled: true,
                requests_per_minute: 600,
                burst_size: 60,
                global_requests_per_minute: 6000,
                global_burst_size: 600,
            },
            cors: CorsConfig {
                enabled: true,
                allowed_origins: vec!["*".to_string()],
                allowed_methods: vec![
                    "GET".to_string(),
                    "POST".to_string(),
                    "PUT".to_string(),
                    "DELETE".to_string(),
                    "OPTIONS".to_string(),
                ],
                allowed_headers: vec![
                    "Authorization".to_string(),
                    "Content-Type".to_string(),
                    "X-Requested-With".to_string(),
                ],
                allow_credentials: false,
                max_age_seconds: 86400, // 24 hours
            },
            monitoring: MonitoringConfig {
                health_path: "/health".to_string(),
                tracing_enabled: true,
            },
        }
    }
}

impl GatewayConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// A missing file is not an error.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("AFRISWAP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .with_list_parse_key("cors.allowed_methods")
                    .with_list_parse_key("cors.allowed_headers"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Get server address
    #[must_use]
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
