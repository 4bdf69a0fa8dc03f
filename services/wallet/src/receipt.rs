//! Transaction receipts handed back to the caller

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use services_common::serde_helpers::{amount, iso_millis};

use crate::Amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

/// Describes one completed balance mutation. Not retained by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub currency: String,
    #[serde(with = "amount")]
    pub amount: Amount,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl Receipt {
    pub(crate) fn now(kind: TransactionKind, currency: &str, amount: Amount) -> Self {
        Self {
            kind,
            currency: currency.to_string(),
            amount,
            timestamp: Utc::now(),
        }
    }
}
