//! Trade handlers

use axum::{
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use trade_ledger::{NewTrade, TradeError, TradeFilter, TradeUpdate};

use crate::{
    error::ApiError,
    extract::Path,
    models::{
        CreateTradeRequest, TradeListQuery, TradeListResponse, TradeResponse, UpdateTradeRequest,
    },
    server::AppState,
};

pub async fn list_trades(
    State(state): State<AppState>,
    Query(query): Query<TradeListQuery>,
) -> Result<Json<TradeListResponse>, ApiError> {
    let filter = TradeFilter::try_from(query)?;
    let trades = state.trades.list(&filter);

    Ok(Json(TradeListResponse {
        message: "Trades",
        count: trades.len(),
        trades,
    }))
}

pub async fn create_trade(
    State(state): State<AppState>,
    payload: Result<Json<CreateTradeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TradeResponse>), ApiError> {
    let Json(request) = payload.map_err(|_| TradeError::MissingFields)?;
    let trade = state.trades.create(NewTrade::try_from(request)?)?;

    Ok((
        StatusCode::CREATED,
        Json(TradeResponse {
            message: Some("Trade created"),
            trade,
        }),
    ))
}

pub async fn get_trade(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TradeResponse>, ApiError> {
    let trade = state.trades.get(trade_id(&id)?)?;
    Ok(Json(TradeResponse {
        message: None,
        trade,
    }))
}

pub async fn update_trade(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTradeRequest>, JsonRejection>,
) -> Result<Json<TradeResponse>, ApiError> {
    let id = trade_id(&id)?;
    let Json(request) = payload.map_err(|_| TradeError::MissingFields)?;
    let trade = state.trades.update(id, TradeUpdate::try_from(request)?)?;

    Ok(Json(TradeResponse {
        message: Some("Trade updated"),
        trade,
    }))
}

/// Ids that are not integers cannot name a trade
fn trade_id(raw: &str) -> Result<u64, TradeError> {
    raw.parse().map_err(|_| TradeError::NotFound)
}
