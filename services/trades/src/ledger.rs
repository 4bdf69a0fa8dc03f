//! In-memory trade store

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use parking_lot::RwLock;
use tracing::{info, warn};

use crate::{Amount, Trade, TradeError, TradeStatus};

/// Fields supplied when opening a trade. Absent values are rejected.
#[derive(Debug, Clone, Default)]
pub struct NewTrade {
    pub user_id: Option<String>,
    pub from_currency: Option<String>,
    pub to_currency: Option<String>,
    pub amount: Option<Amount>,
    /// Defaults to 1 when absent or zero
    pub exchange_rate: Option<Amount>,
}

/// Partial update; `None` leaves the field as is
#[derive(Debug, Clone, Default)]
pub struct TradeUpdate {
    pub status: Option<TradeStatus>,
    /// Zero is ignored
    pub exchange_rate: Option<Amount>,
}

/// List filter; `None` matches everything
#[derive(Debug, Clone, Default)]
pub struct TradeFilter {
    pub user_id: Option<String>,
    pub status: Option<TradeStatus>,
}

impl TradeFilter {
    fn matches(&self, trade: &Trade) -> bool {
        self.user_id.as_ref().is_none_or(|u| *u == trade.user_id)
            && self.status.is_none_or(|s| s == trade.status)
    }
}

/// Trades in insertion order
#[derive(Debug)]
pub struct TradeLedger {
    trades: RwLock<Vec<Trade>>,
    next_id: AtomicU64,
}

impl Default for TradeLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl TradeLedger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            trades: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Trades matching `filter`, oldest first
    #[must_use]
    pub fn list(&self, filter: &TradeFilter) -> Vec<Trade> {
        self.trades
            .read()
            .iter()
            .filter(|trade| filter.matches(trade))
            .cloned()
            .collect()
    }

    /// Open a new `pending` trade
    pub fn create(&self, request: NewTrade) -> Result<Trade, TradeError> {
        let user_id = present(request.user_id)?;
        let from_currency = present(request.from_currency)?;
        let to_currency = present(request.to_currency)?;
        let amount = match request.amount {
            Some(amount) if amount.is_zero() => return Err(TradeError::MissingFields),
            Some(amount) if amount < Amount::ZERO => return Err(TradeError::InvalidAmount),
            Some(amount) => amount,
            None => return Err(TradeError::MissingFields),
        };
        let exchange_rate = match request.exchange_rate {
            None => Amount::ONE,
            Some(rate) => effective_rate(rate)?.unwrap_or(Amount::ONE),
        };
        let converted_amount = convert(amount, exchange_rate)?;

        let now = Utc::now();
        let trade = Trade {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            user_id,
            from_currency,
            to_currency,
            amount,
            exchange_rate,
            converted_amount,
            status: TradeStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        self.trades.write().push(trade.clone());
        info!(
            trade_id = trade.id,
            user_id = %trade.user_id,
            from = %trade.from_currency,
            to = %trade.to_currency,
            amount = %trade.amount,
            "Trade created"
        );
        Ok(trade)
    }

    pub fn get(&self, id: u64) -> Result<Trade, TradeError> {
        self.trades
            .read()
            .iter()
            .find(|trade| trade.id == id)
            .cloned()
            .ok_or(TradeError::NotFound)
    }

    /// Apply `update` and refresh `updated_at`
    pub fn update(&self, id: u64, update: TradeUpdate) -> Result<Trade, TradeError> {
        let rate = match update.exchange_rate {
            Some(rate) => effective_rate(rate)?,
            None => None,
        };

        let mut trades = self.trades.write();
        let trade = trades
            .iter_mut()
            .find(|trade| trade.id == id)
            .ok_or(TradeError::NotFound)?;

        if let Some(rate) = rate {
            trade.converted_amount = convert(trade.amount, rate)?;
            trade.exchange_rate = rate;
        }
        if let Some(status) = update.status {
            trade.status = status;
        }
        trade.updated_at = Utc::now();

        info!(trade_id = id, status = %trade.status, rate = %trade.exchange_rate, "Trade updated");
        Ok(trade.clone())
    }
}

fn present(field: Option<String>) -> Result<String, TradeError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(TradeError::MissingFields),
    }
}

/// `Ok(None)` for a zero rate, which means "not supplied"
fn effective_rate(rate: Amount) -> Result<Option<Amount>, TradeError> {
    if rate < Amount::ZERO {
        warn!(%rate, "Negative exchange rate");
        return Err(TradeError::InvalidAmount);
    }
    Ok((!rate.is_zero()).then_some(rate))
}

fn convert(amount: Amount, rate: Amount) -> Result<Amount, TradeError> {
    amount.checked_mul(rate).ok_or(TradeError::InvalidAmount)
}
