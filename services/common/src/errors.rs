//! Common error types for services

use serde::{Deserialize, Serialize};

/// Domain errors that can be reported to an API client.
///
/// Every service error maps to a stable machine-readable code. The HTTP layer
/// decides the status; the code and display text travel in the body.
pub trait WireError: std::error::Error {
    /// Stable upper-snake-case code, e.g. `INSUFFICIENT_BALANCE`
    fn code(&self) -> &'static str;
}

/// Error details inside the envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable error message
    pub message: String,
    /// Error code identifier
    pub code: String,
}

/// `{"error": {"message": ..., "code": ...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

impl ErrorEnvelope {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                code: code.into(),
            },
        }
    }

    /// Build an envelope from any service error
    pub fn from_error<E: WireError>(err: &E) -> Self {
        Self::new(err.code(), err.to_string())
    }
}
