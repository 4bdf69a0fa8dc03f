//! REST API models and request/response types
//!
//! Request bodies are decoded loosely (every field optional, amounts as raw
//! JSON numbers) and then coerced into typed domain requests here, so that
//! malformed input gets the same error code as a missing field.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use services_common::serde_helpers::decimal_from_json;
use trade_ledger::{NewTrade, Trade, TradeError, TradeFilter, TradeStatus, TradeUpdate};
use wallet_ledger::{Receipt, Wallet};

/// Module root listing
#[derive(Debug, Serialize)]
pub struct ModuleInfo {
    pub message: &'static str,
    pub endpoints: &'static [&'static str],
}

/// Plain acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

// ---- wallet ----

/// Deposit/withdraw body: `{currency, amount}`
#[derive(Debug, Default, Deserialize)]
pub struct BalanceMutationRequest {
    pub currency: Option<String>,
    pub amount: Option<serde_json::Number>,
}

impl BalanceMutationRequest {
    /// `None` when either field is absent or the amount is out of range
    #[must_use]
    pub fn into_parts(self) -> Option<(String, Decimal)> {
        let currency = self.currency?;
        let amount = decimal_from_json(&self.amount?)?;
        Some((currency, amount))
    }
}

#[derive(Debug, Serialize)]
pub struct WalletResponse {
    pub message: &'static str,
    pub wallet: Wallet,
}

#[derive(Debug, Serialize)]
pub struct WalletUpdateResponse {
    pub message: &'static str,
    pub wallet: Wallet,
    pub transaction: Receipt,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsResponse {
    pub message: &'static str,
    pub user_id: String,
    pub transactions: Vec<Receipt>,
}

// ---- auth ----

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub user: UserView,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct LoginUser {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    pub user: LoginUser,
}

#[derive(Debug, Serialize)]
pub struct CurrentUser {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: CurrentUser,
}

// ---- trades ----

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTradeRequest {
    pub user_id: Option<String>,
    pub from_currency: Option<String>,
    pub to_currency: Option<String>,
    pub amount: Option<serde_json::Number>,
    pub exchange_rate: Option<serde_json::Number>,
}

impl TryFrom<CreateTradeRequest> for NewTrade {
    type Error = TradeError;

    fn try_from(request: CreateTradeRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: request.user_id,
            from_currency: request.from_currency,
            to_currency: request.to_currency,
            amount: request.amount.as_ref().map(number).transpose()?,
            exchange_rate: request.exchange_rate.as_ref().map(number).transpose()?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTradeRequest {
    pub status: Option<String>,
    pub exchange_rate: Option<serde_json::Number>,
}

impl TryFrom<UpdateTradeRequest> for TradeUpdate {
    type Error = TradeError;

    fn try_from(request: UpdateTradeRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            status: non_empty(request.status)
                .map(|s| s.parse::<TradeStatus>())
                .transpose()?,
            exchange_rate: request.exchange_rate.as_ref().map(number).transpose()?,
        })
    }
}

/// `GET /api/trades?userId=&status=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeListQuery {
    pub user_id: Option<String>,
    pub status: Option<String>,
}

impl TryFrom<TradeListQuery> for TradeFilter {
    type Error = TradeError;

    fn try_from(query: TradeListQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: non_empty(query.user_id),
            status: non_empty(query.status)
                .map(|s| s.parse::<TradeStatus>())
                .transpose()?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct TradeListResponse {
    pub message: &'static str,
    pub count: usize,
    pub trades: Vec<Trade>,
}

#[derive(Debug, Serialize)]
pub struct TradeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub trade: Trade,
}

fn number(value: &serde_json::Number) -> Result<Decimal, TradeError> {
    decimal_from_json(value).ok_or(TradeError::InvalidAmount)
}

/// Empty strings count as absent
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
