//! Trade advice and rate forecasts
//!
//! Both the advisor and the rate predictor sit behind traits so model-backed
//! implementations can be dropped in. The bundled [`OfflineAdvisor`] and
//! [`TrendPredictor`] never leave the process: they build the prompt a model
//! would receive and answer deterministically.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use services_common::serde_helpers::amount;
use tracing::debug;

/// Who is asking
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryContext {
    pub user_id: Option<String>,
    pub country: Option<String>,
}

/// `POST /api/ai/assistant` body
#[derive(Debug, Default, Deserialize)]
pub struct AdvisoryRequest {
    pub question: Option<String>,
    #[serde(default)]
    pub context: AdvisoryContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub answer: String,
    pub suggestions: Vec<String>,
}

#[async_trait]
pub trait TradeAdvisor: Send + Sync {
    async fn advise(&self, question: &str, context: &AdvisoryContext) -> Advice;
}

/// Prompt handed to the advisory model
#[must_use]
pub fn build_prompt(question: &str, context: &AdvisoryContext) -> String {
    let country = context.country.as_deref().unwrap_or("an unspecified country");
    format!(
        "As a cross-border trade expert for Africa, answer: {question}\nUser from {country}"
    )
}

struct Topic {
    keywords: &'static [&'static str],
    summary: &'static str,
    suggestions: &'static [&'static str],
}

const TOPICS: &[Topic] = &[
    Topic {
        keywords: &["rate", "exchange", "convert", "fx"],
        summary: "Exchange rates between African currencies move with commodity prices and central bank policy, so compare quotes close to settlement.",
        suggestions: &[
            "Compare the quoted rate with the central bank reference rate",
            "Split large conversions across several days",
            "Lock a rate when opening the trade if volatility is high",
        ],
    },
    Topic {
        keywords: &["fee", "cost", "charge", "commission"],
        summary: "Total cost is the spread plus transfer fees, so judge offers by the converted amount received rather than the headline fee.",
        suggestions: &[
            "Check the converted amount, not only the fee",
            "Batch small transfers to reduce fixed charges",
        ],
    },
    Topic {
        keywords: &["document", "customs", "invoice", "afcfta", "certificate"],
        summary: "Goods moving under AfCFTA preferences need a certificate of origin and a commercial invoice that match the declared value.",
        suggestions: &[
            "Prepare a certificate of origin for preferential tariffs",
            "Keep invoices in the currency of the trade",
            "Confirm HS codes with the destination customs authority",
        ],
    },
    Topic {
        keywords: &["pay", "payment", "transfer", "send", "mobile money"],
        summary: "Mobile money and regional payment rails usually settle faster than correspondent banking for intra-African payments.",
        suggestions: &[
            "Use a regional payment rail where both sides support it",
            "Verify the recipient's wallet details before sending",
        ],
    },
];

const GENERAL_SUGGESTIONS: &[&str] = &[
    "Ask about exchange rates, fees, documentation or payments",
    "Check your wallet balance before opening a trade",
];

/// Rule-based advisor with no external calls
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineAdvisor;

#[async_trait]
impl TradeAdvisor for OfflineAdvisor {
    async fn advise(&self, question: &str, context: &AdvisoryContext) -> Advice {
        let prompt = build_prompt(question, context);
        debug!(user_id = ?context.user_id, %prompt, "Advisory prompt");

        let lowered = question.to_lowercase();
        let matched: Vec<&Topic> = TOPICS
            .iter()
            .filter(|topic| topic.keywords.iter().any(|k| lowered.contains(k)))
            .collect();

        if matched.is_empty() {
            return Advice {
                answer: "I can help with cross-border trade questions about currencies, costs, documentation and payments.".to_string(),
                suggestions: GENERAL_SUGGESTIONS.iter().map(|s| (*s).to_string()).collect(),
            };
        }

        let answer = matched
            .iter()
            .map(|topic| topic.summary)
            .collect::<Vec<_>>()
            .join(" ");
        let suggestions = matched
            .iter()
            .flat_map(|topic| topic.suggestions.iter())
            .map(|s| (*s).to_string())
            .collect();

        Advice {
            answer,
            suggestions,
        }
    }
}

/// `POST /api/ai/rate-prediction` body
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatePredictionRequest {
    pub from_currency: Option<String>,
    pub to_currency: Option<String>,
    #[serde(default)]
    pub historical_data: Vec<serde_json::Number>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatePrediction {
    #[serde(with = "amount")]
    pub predicted_rate: Decimal,
    /// Between 0 and 1
    #[serde(with = "amount")]
    pub confidence: Decimal,
}

#[async_trait]
pub trait RatePredictor: Send + Sync {
    /// `None` when `history` is empty or the arithmetic overflows
    async fn predict_rate(
        &self,
        from: &str,
        to: &str,
        history: &[Decimal],
    ) -> Option<RatePrediction>;
}

/// Prompt handed to the forecasting model
#[must_use]
pub fn build_rate_prompt(from: &str, to: &str, history: &[Decimal]) -> String {
    let points = history
        .iter()
        .map(Decimal::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Predict exchange rate for {from} to {to}.\nHistorical data: [{points}]\nConsider African market factors."
    )
}

/// Observations the trend predictor looks back over
const PREDICTION_WINDOW: usize = 5;

/// Extrapolates the average step across the most recent observations.
///
/// Confidence falls with the spread of the window around its mean and with
/// short histories.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrendPredictor;

#[async_trait]
impl RatePredictor for TrendPredictor {
    async fn predict_rate(
        &self,
        from: &str,
        to: &str,
        history: &[Decimal],
    ) -> Option<RatePrediction> {
        debug!(prompt = %build_rate_prompt(from, to, history), "Rate prompt");

        let window = &history[history.len().saturating_sub(PREDICTION_WINDOW)..];
        let (&first, &last) = (window.first()?, window.last()?);
        let count = Decimal::from(window.len());

        let steps = count - Decimal::ONE;
        let drift = if steps.is_zero() {
            Decimal::ZERO
        } else {
            last.checked_sub(first)?.checked_div(steps)?
        };
        let predicted = last.checked_add(drift)?.max(Decimal::ZERO);

        let mean = window
            .iter()
            .try_fold(Decimal::ZERO, |acc, x| acc.checked_add(*x))?
            .checked_div(count)?;
        let spread = window
            .iter()
            .try_fold(Decimal::ZERO, |acc, x| acc.checked_add((*x - mean).abs()))?
            .checked_div(count)?;
        let stability = if mean.is_zero() {
            Decimal::ZERO
        } else {
            (Decimal::ONE - spread.checked_div(mean)?).max(Decimal::ZERO)
        };
        let coverage = count / Decimal::from(PREDICTION_WINDOW);

        let prediction = RatePrediction {
            predicted_rate: predicted.round_dp(6),
            confidence: (stability * coverage).round_dp(2),
        };
        debug!(from, to, ?prediction, "Rate predicted");
        Some(prediction)
    }
}
