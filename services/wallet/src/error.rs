//! Ledger error taxonomy

use services_common::WireError;
use thiserror::Error;

/// Rejections produced by the wallet ledger.
///
/// Every variant is a caller input problem. None of them leave a partial
/// mutation behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Deposit with a missing currency or a missing/non-positive amount
    #[error("{0}")]
    InvalidDeposit(String),

    /// Withdrawal with a missing currency or a missing/non-positive amount
    #[error("{0}")]
    InvalidWithdrawal(String),

    /// Withdrawal exceeds the funds held in that currency
    #[error("Insufficient balance")]
    InsufficientBalance,
}

/// Message used for every malformed mutation request
pub const INVALID_MUTATION_MESSAGE: &str = "Currency and positive amount required";

impl LedgerError {
    #[must_use]
    pub fn invalid_deposit() -> Self {
        Self::InvalidDeposit(INVALID_MUTATION_MESSAGE.to_string())
    }

    #[must_use]
    pub fn invalid_withdrawal() -> Self {
        Self::InvalidWithdrawal(INVALID_MUTATION_MESSAGE.to_string())
    }
}

impl WireError for LedgerError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidDeposit(_) => "INVALID_DEPOSIT",
            Self::InvalidWithdrawal(_) => "INVALID_WITHDRAWAL",
            Self::InsufficientBalance => "INSUFFICIENT_BALANCE",
        }
    }
}
