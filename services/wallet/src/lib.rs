//! Wallet Ledger
//!
//! Per-user, multi-currency balances with deposit and withdrawal.
//!
//! Guarantees after every completed operation:
//! - `balance` equals the sum of all per-currency amounts
//! - no per-currency amount is negative
//! - a rejected operation leaves every wallet untouched
//!
//! Wallets materialize on the first successful deposit. Reads for unknown
//! users synthesize an empty wallet without storing it.

pub mod error;
pub mod ledger;
pub mod receipt;
pub mod wallet;

pub use error::LedgerError;
pub use ledger::{LedgerUpdate, WalletLedger};
pub use receipt::{Receipt, TransactionKind};
pub use wallet::Wallet;

/// Monetary amount, exact decimal
pub type Amount = rust_decimal::Decimal;
