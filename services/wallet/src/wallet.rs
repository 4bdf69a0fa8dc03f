//! Wallet record

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use services_common::serde_helpers::{amount, amount_map};

use crate::Amount;

/// Balances held by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub user_id: String,
    /// Denormalized sum of `currencies`
    #[serde(with = "amount")]
    pub balance: Amount,
    #[serde(with = "amount_map")]
    pub currencies: BTreeMap<String, Amount>,
}

impl Wallet {
    /// Zero-balance wallet with no currencies
    #[must_use]
    pub fn empty(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            balance: Amount::ZERO,
            currencies: BTreeMap::new(),
        }
    }

    /// Amount held in `currency`, if the wallet has an entry for it
    #[must_use]
    pub fn held(&self, currency: &str) -> Option<Amount> {
        self.currencies.get(currency).copied()
    }

    /// `balance == sum(currencies)` and nothing negative
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let sum: Amount = self.currencies.values().copied().sum();
        sum == self.balance
            && self.balance >= Amount::ZERO
            && self.currencies.values().all(|v| *v >= Amount::ZERO)
    }
}
