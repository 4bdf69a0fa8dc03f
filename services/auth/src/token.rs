//! JWT issuance and verification

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{AuthConfig, AuthError};

/// Token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    /// Present for registered users
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and validates HS256 tokens with a shared secret
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_seconds: i64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("keys", &"<redacted>")
            .field("expiry_seconds", &self.expiry_seconds)
            .finish()
    }
}

impl TokenIssuer {
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            expiry_seconds: i64::try_from(config.token_expiry_seconds).unwrap_or(i64::MAX),
        }
    }

    /// Sign a token for `email`, valid from now for the configured expiry
    pub fn issue(&self, email: &str, uid: Option<&str>) -> Result<String, AuthError> {
        let iat = Utc::now().timestamp();
        let claims = Claims {
            email: email.to_string(),
            uid: uid.map(str::to_string),
            iat,
            exp: iat.saturating_add(self.expiry_seconds),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            warn!("Failed to sign token: {}", e);
            AuthError::TokenIssue(e.to_string())
        })
    }

    /// Check signature and expiry
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                AuthError::InvalidToken
            })
    }
}
