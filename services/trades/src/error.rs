//! Trade ledger errors

use services_common::{CODE_MISSING_FIELDS, CODE_NOT_FOUND, WireError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TradeError {
    /// userId, currencies or amount absent
    #[error("Missing required fields")]
    MissingFields,

    /// Negative amount or exchange rate, or a product that does not fit
    #[error("Amount and exchange rate must be positive")]
    InvalidAmount,

    #[error("Unknown trade status '{0}'")]
    InvalidStatus(String),

    #[error("Trade not found")]
    NotFound,
}

impl WireError for TradeError {
    fn code(&self) -> &'static str {
        match self {
            Self::MissingFields => CODE_MISSING_FIELDS,
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::InvalidStatus(_) => "INVALID_STATUS",
            Self::NotFound => CODE_NOT_FOUND,
        }
    }
}
