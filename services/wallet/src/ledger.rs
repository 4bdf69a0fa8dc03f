//! In-memory wallet ledger
//!
//! Wallets live in a sharded concurrent map. Every mutation runs its
//! validation, sufficiency check and update while holding the write guard
//! for that user's entry, so concurrent requests for the same user serialize
//! and requests for different users do not contend.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{Amount, LedgerError, Receipt, TransactionKind, Wallet};

/// Result of a successful deposit or withdrawal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerUpdate {
    /// Wallet state right after the mutation
    pub wallet: Wallet,
    /// Receipt describing the mutation
    pub receipt: Receipt,
}

/// Owns every wallet of the process.
///
/// Construct one at service start and share it (e.g. behind an `Arc`) with
/// whatever handles requests.
#[derive(Debug, Default)]
pub struct WalletLedger {
    wallets: DashMap<String, Wallet, FxBuildHasher>,
}

impl WalletLedger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            wallets: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// Current wallet for `user_id`, or a synthesized empty one.
    ///
    /// Never creates a record.
    #[must_use]
    pub fn get_balance(&self, user_id: &str) -> Wallet {
        self.wallets
            .get(user_id)
            .map(|wallet| wallet.value().clone())
            .unwrap_or_else(|| Wallet::empty(user_id))
    }

    /// Credit `amount` of `currency`, creating the wallet on first use
    pub fn deposit(
        &self,
        user_id: &str,
        currency: &str,
        amount: Amount,
    ) -> Result<LedgerUpdate, LedgerError> {
        if !is_well_formed(currency, amount) {
            warn!(user_id, currency, %amount, "Rejected deposit");
            return Err(LedgerError::invalid_deposit());
        }

        let wallet = match self.wallets.entry(user_id.to_string()) {
            Entry::Occupied(mut entry) => {
                credit(entry.get_mut(), currency, amount)?;
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                let mut wallet = Wallet::empty(user_id);
                credit(&mut wallet, currency, amount)?;
                debug!(user_id, "Wallet created");
                entry.insert(wallet).value().clone()
            }
        };

        info!(user_id, currency, %amount, balance = %wallet.balance, "Deposit applied");
        Ok(LedgerUpdate {
            wallet,
            receipt: Receipt::now(TransactionKind::Deposit, currency, amount),
        })
    }

    /// Debit `amount` of `currency`.
    ///
    /// Fails with [`LedgerError::InsufficientBalance`] when the user has no
    /// wallet, no entry for `currency`, or holds less than `amount`.
    pub fn withdraw(
        &self,
        user_id: &str,
        currency: &str,
        amount: Amount,
    ) -> Result<LedgerUpdate, LedgerError> {
        if !is_well_formed(currency, amount) {
            warn!(user_id, currency, %amount, "Rejected withdrawal");
            return Err(LedgerError::invalid_withdrawal());
        }

        let Some(mut entry) = self.wallets.get_mut(user_id) else {
            warn!(user_id, currency, %amount, "Withdrawal from unknown wallet");
            return Err(LedgerError::InsufficientBalance);
        };
        debit(entry.value_mut(), currency, amount)?;
        let wallet = entry.value().clone();
        drop(entry);

        info!(user_id, currency, %amount, balance = %wallet.balance, "Withdrawal applied");
        Ok(LedgerUpdate {
            wallet,
            receipt: Receipt::now(TransactionKind::Withdrawal, currency, amount),
        })
    }

    /// Transaction history for `user_id`.
    ///
    /// Receipts are not retained, so this is always empty.
    #[must_use]
    pub fn list_transactions(&self, user_id: &str) -> Vec<Receipt> {
        debug!(user_id, "Transaction history requested");
        Vec::new()
    }

    /// Number of wallets that have been materialized
    #[must_use]
    pub fn wallet_count(&self) -> usize {
        self.wallets.len()
    }
}

fn is_well_formed(currency: &str, amount: Amount) -> bool {
    !currency.trim().is_empty() && amount > Amount::ZERO
}

fn credit(wallet: &mut Wallet, currency: &str, amount: Amount) -> Result<(), LedgerError> {
    let held = wallet.held(currency).unwrap_or(Amount::ZERO);
    let (Some(new_held), Some(new_balance)) = (
        held.checked_add(amount),
        wallet.balance.checked_add(amount),
    ) else {
        warn!(user_id = %wallet.user_id, currency, %amount, "Deposit overflows wallet");
        return Err(LedgerError::invalid_deposit());
    };

    wallet.currencies.insert(currency.to_string(), new_held);
    wallet.balance = new_balance;
    Ok(())
}

fn debit(wallet: &mut Wallet, currency: &str, amount: Amount) -> Result<(), LedgerError> {
    let held = match wallet.held(currency) {
        Some(held) if held >= amount => held,
        held => {
            warn!(
                user_id = %wallet.user_id,
                currency,
                %amount,
                held = %held.unwrap_or(Amount::ZERO),
                "Insufficient balance"
            );
            return Err(LedgerError::InsufficientBalance);
        }
    };

    // balance >= held >= amount
    wallet.currencies.insert(currency.to_string(), held - amount);
    wallet.balance -= amount;
    Ok(())
}
