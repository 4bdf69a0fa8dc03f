//! Trade assistant handlers

use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use rust_decimal::Decimal;
use services_common::{CODE_MISSING_FIELDS, serde_helpers::decimal_from_json};

use crate::{
    advisory::{Advice, AdvisoryRequest, RatePrediction, RatePredictionRequest},
    error::{ApiError, CODE_INVALID_RATE},
    models::ModuleInfo,
    server::AppState,
};

pub async fn module_info() -> Json<ModuleInfo> {
    Json(ModuleInfo {
        message: "AI module",
        endpoints: &["POST /api/ai/assistant", "POST /api/ai/rate-prediction"],
    })
}

pub async fn assistant(
    State(state): State<AppState>,
    payload: Result<Json<AdvisoryRequest>, JsonRejection>,
) -> Result<Json<Advice>, ApiError> {
    let (question, context) = payload
        .ok()
        .and_then(|Json(request)| {
            let question = request.question.filter(|q| !q.trim().is_empty())?;
            Some((question, request.context))
        })
        .ok_or_else(|| {
            ApiError::new(
                StatusCode::BAD_REQUEST,
                CODE_MISSING_FIELDS,
                "Question is required",
            )
        })?;

    Ok(Json(state.advisor.advise(&question, &context).await))
}

/// Forecast the next rate for a currency pair from past observations
pub async fn rate_prediction(
    State(state): State<AppState>,
    payload: Result<Json<RatePredictionRequest>, JsonRejection>,
) -> Result<Json<RatePrediction>, ApiError> {
    let missing = || {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            CODE_MISSING_FIELDS,
            "fromCurrency, toCurrency and historicalData are required",
        )
    };

    let Ok(Json(request)) = payload else {
        return Err(missing());
    };
    let from = request
        .from_currency
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(missing)?;
    let to = request
        .to_currency
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(missing)?;
    if request.historical_data.is_empty() {
        return Err(missing());
    }

    let history = request
        .historical_data
        .iter()
        .map(|raw| decimal_from_json(raw).filter(|rate| *rate > Decimal::ZERO))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| {
            ApiError::new(
                StatusCode::BAD_REQUEST,
                CODE_INVALID_RATE,
                "Historical rates must be positive numbers",
            )
        })?;

    let prediction = state
        .predictor
        .predict_rate(&from, &to, &history)
        .await
        .ok_or_else(ApiError::internal)?;
    Ok(Json(prediction))
}
