//! Authentication Service
//!
//! Identity directory and bearer token handling for the AfriSwap backend.
//! Tokens are HS256 JWTs carrying the user's `email` and, when known, `uid`.

pub mod directory;
pub mod error;
pub mod token;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use directory::InMemoryAuthService;
pub use error::AuthError;
pub use token::{Claims, TokenIssuer};

/// Authentication service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT secret for token signing
    pub jwt_secret: String,
    /// Token expiry in seconds
    pub token_expiry_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "dev-secret-key-change-in-production".to_string(),
            token_expiry_seconds: services_common::DEFAULT_TOKEN_EXPIRY_SECS,
        }
    }
}

/// Profile of a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// Freshly registered user plus an access token
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: UserRecord,
    pub token: String,
}

/// Authentication service trait
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and sign them in
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<Registration, AuthError>;

    /// Issue a token for `email`
    async fn login(&self, email: &str, password: &str) -> Result<String, AuthError>;

    /// Validate a bearer token and return its claims
    async fn verify_token(&self, token: &str) -> Result<Claims, AuthError>;
}
