//! Trade Ledger
//!
//! In-memory collection of currency conversion requests. Trades get
//! sequential integer ids, start out `pending` and carry the converted
//! amount implied by their exchange rate.

pub mod error;
pub mod ledger;
pub mod trade;

pub use error::TradeError;
pub use ledger::{NewTrade, TradeFilter, TradeLedger, TradeUpdate};
pub use trade::{Trade, TradeStatus};

/// Monetary amount, exact decimal
pub type Amount = rust_decimal::Decimal;
