//! Wallet handlers

use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use wallet_ledger::LedgerError;

use crate::{
    error::ApiError,
    extract::Path,
    models::{
        BalanceMutationRequest, ModuleInfo, TransactionsResponse, WalletResponse,
        WalletUpdateResponse,
    },
    server::AppState,
};

pub async fn module_info() -> Json<ModuleInfo> {
    Json(ModuleInfo {
        message: "Wallet module",
        endpoints: &[
            "GET /api/wallet/:userId",
            "POST /api/wallet/:userId/deposit",
            "POST /api/wallet/:userId/withdraw",
            "GET /api/wallet/:userId/transactions",
        ],
    })
}

pub async fn get_balance(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<WalletResponse> {
    Json(WalletResponse {
        message: "Wallet balance",
        wallet: state.wallets.get_balance(&user_id),
    })
}

pub async fn deposit(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<BalanceMutationRequest>, JsonRejection>,
) -> Result<Json<WalletUpdateResponse>, ApiError> {
    let (currency, amount) = mutation_parts(payload).ok_or_else(LedgerError::invalid_deposit)?;
    let update = state.wallets.deposit(&user_id, &currency, amount)?;

    Ok(Json(WalletUpdateResponse {
        message: "Deposit successful",
        wallet: update.wallet,
        transaction: update.receipt,
    }))
}

pub async fn withdraw(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<BalanceMutationRequest>, JsonRejection>,
) -> Result<Json<WalletUpdateResponse>, ApiError> {
    let (currency, amount) =
        mutation_parts(payload).ok_or_else(LedgerError::invalid_withdrawal)?;
    let update = state.wallets.withdraw(&user_id, &currency, amount)?;

    Ok(Json(WalletUpdateResponse {
        message: "Withdrawal successful",
        wallet: update.wallet,
        transaction: update.receipt,
    }))
}

pub async fn list_transactions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<TransactionsResponse> {
    let transactions = state.wallets.list_transactions(&user_id);
    Json(TransactionsResponse {
        message: "Transactions",
        user_id,
        transactions,
    })
}

/// Undecodable bodies are treated like missing fields
fn mutation_parts(
    payload: Result<Json<BalanceMutationRequest>, JsonRejection>,
) -> Option<(String, rust_decimal::Decimal)> {
    match payload {
        Ok(Json(request)) => request.into_parts(),
        Err(rejection) => {
            tracing::debug!(%rejection, "Unreadable balance mutation body");
            None
        }
    }
}
