//! Authentication errors

use services_common::{CODE_MISSING_FIELDS, WireError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Email and password are required")]
    MissingFields,

    #[error("Email already registered")]
    EmailExists,

    /// No bearer token on a protected request
    #[error("Unauthorized")]
    NoToken,

    /// Bad signature, malformed or expired token
    #[error("Invalid token")]
    InvalidToken,

    #[error("Failed to issue token: {0}")]
    TokenIssue(String),
}

impl WireError for AuthError {
    fn code(&self) -> &'static str {
        match self {
            Self::MissingFields => CODE_MISSING_FIELDS,
            Self::EmailExists => "EMAIL_EXISTS",
            Self::NoToken => "NO_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenIssue(_) => "TOKEN_ERROR",
        }
    }
}
