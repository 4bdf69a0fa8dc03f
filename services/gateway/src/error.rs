//! HTTP error responses
//!
//! Every failure leaves the gateway as `{"error": {"message", "code"}}` with
//! a status chosen here.

use auth_service::AuthError;
use axum::{
    Json,
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services_common::{CODE_NOT_FOUND, CODE_SERVER_ERROR, ErrorEnvelope, WireError};
use trade_ledger::TradeError;
use wallet_ledger::LedgerError;

/// Path parameter that could not be decoded
pub const CODE_INVALID_PATH: &str = "INVALID_PATH";
pub const CODE_TIMEOUT: &str = "TIMEOUT";
pub const CODE_METHOD_NOT_ALLOWED: &str = "METHOD_NOT_ALLOWED";
pub const CODE_INVALID_RATE: &str = "INVALID_RATE";

/// Error returned by every handler
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    fn from_wire<E: WireError>(status: StatusCode, err: &E) -> Self {
        Self::new(status, err.code(), err.to_string())
    }

    #[must_use]
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, CODE_NOT_FOUND, "Not Found")
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            CODE_SERVER_ERROR,
            "Internal Server Error",
        )
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, CODE_INVALID_PATH, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorEnvelope::new(self.code, self.message);
        (self.status, Json(body)).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        // Every ledger rejection is a client input problem
        Self::from_wire(StatusCode::BAD_REQUEST, &err)
    }
}

impl From<TradeError> for ApiError {
    fn from(err: TradeError) -> Self {
        let status = match err {
            TradeError::NotFound => StatusCode::NOT_FOUND,
            TradeError::MissingFields | TradeError::InvalidAmount | TradeError::InvalidStatus(_) => {
                StatusCode::BAD_REQUEST
            }
        };
        Self::from_wire(status, &err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let status = match err {
            AuthError::MissingFields => StatusCode::BAD_REQUEST,
            AuthError::EmailExists => StatusCode::CONFLICT,
            AuthError::NoToken | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::TokenIssue(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::from_wire(status, &err)
    }
}
