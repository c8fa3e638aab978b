//! API route handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use spend_oracle::aggregate::{forecast_by_category, AggregatorConfig, DailyTotals};
use spend_oracle::data::{DailySeries, Transaction};
use spend_oracle::forecaster::{forecast_bands, SampleForecaster};
use spend_oracle::scenario::{apply_scenario, Scenario};
use spend_oracle::OracleError;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::AppState;

/// Requests backed by fewer store records than this are rejected outright
const MIN_REQUEST_TRANSACTIONS: usize = 10;

/// Days of history fetched before the requested range
const HISTORY_DAYS: u64 = 90;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub user_id: String,
    /// `YYYY-MM-DD_to_YYYY-MM-DD`, inclusive on both ends
    pub time_range: String,
}

#[derive(Debug, Deserialize)]
pub struct ScenarioRequest {
    pub user_id: String,
    pub time_range: String,
    pub scenario: Scenario,
}

#[derive(Debug, Serialize)]
pub struct DailyPrediction {
    pub amount: f64,
    pub confidence_low: f64,
    pub confidence_high: f64,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub user_id: String,
    pub predictions: BTreeMap<NaiveDate, DailyPrediction>,
}

#[derive(Debug, Serialize)]
pub struct ScenarioResponse {
    pub user_id: String,
    pub predictions_without_param: DailyTotals,
    pub predictions_with_param: DailyTotals,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// An error ready to leave the HTTP layer
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn model_unavailable() -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "Prediction model not loaded.".to_string(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<OracleError> for ApiError {
    fn from(err: OracleError) -> Self {
        let status = match &err {
            OracleError::InsufficientData(_)
            | OracleError::InvalidDateRange(_)
            | OracleError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            OracleError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            OracleError::ForecasterFailure(_)
            | OracleError::IoError(_)
            | OracleError::CsvError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Parse `YYYY-MM-DD_to_YYYY-MM-DD` into the inclusive daily date sequence
fn parse_time_range(raw: &str) -> Result<Vec<NaiveDate>, OracleError> {
    let invalid = || {
        OracleError::InvalidDateRange(format!(
            "Invalid time_range format. Expected YYYY-MM-DD_to_YYYY-MM-DD, got: {raw}"
        ))
    };

    let (start, end) = raw.split_once("_to_").ok_or_else(invalid)?;
    let start: NaiveDate = start.parse().map_err(|_| invalid())?;
    let end: NaiveDate = end.parse().map_err(|_| invalid())?;
    if end < start {
        return Err(OracleError::InvalidDateRange(format!(
            "time_range ends before it starts: {raw}"
        )));
    }

    Ok(start.iter_days().take_while(|date| *date <= end).collect())
}

/// Fetch the history window preceding the prediction range and enforce the
/// minimum-record precondition before any forecasting work happens
async fn fetch_history(
    state: &AppState,
    user_id: &str,
    range_start: NaiveDate,
) -> Result<Vec<Transaction>, ApiError> {
    let history_start = range_start - Days::new(HISTORY_DAYS);
    let transactions = state
        .store
        .transactions_for(user_id, history_start, range_start)
        .await?;

    if transactions.len() < MIN_REQUEST_TRANSACTIONS {
        return Err(OracleError::InsufficientData(format!(
            "Need at least {MIN_REQUEST_TRANSACTIONS} transactions for predictions, got {}",
            transactions.len()
        ))
        .into());
    }

    tracing::info!(user_id, count = transactions.len(), "history fetched");
    Ok(transactions)
}

fn require_model(state: &AppState) -> Result<Arc<dyn SampleForecaster>, ApiError> {
    state.model.clone().ok_or_else(ApiError::model_unavailable)
}

/// Total-spending forecast with confidence bounds for every requested date
pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let model = require_model(&state)?;
    let dates = parse_time_range(&req.time_range)?;
    let transactions = fetch_history(&state, &req.user_id, dates[0]).await?;

    let horizon = dates.len();
    let num_samples = state.num_samples;
    let bands = tokio::task::spawn_blocking(move || {
        let spending: Vec<(NaiveDate, f64)> = transactions
            .iter()
            .filter(|t| !t.is_income())
            .map(|t| (t.date, t.amount))
            .collect();
        let series = DailySeries::from_daily_amounts(&spending)?;
        forecast_bands(model.as_ref(), &series, horizon, num_samples)
    })
    .await
    .map_err(|err| ApiError::internal(format!("forecast task failed: {err}")))??;

    let predictions = dates
        .into_iter()
        .enumerate()
        .map(|(i, date)| {
            (
                date,
                DailyPrediction {
                    amount: bands.median()[i],
                    confidence_low: bands.low()[i],
                    confidence_high: bands.high()[i],
                },
            )
        })
        .collect();

    Ok(Json(PredictResponse {
        user_id: req.user_id,
        predictions,
    }))
}

/// Per-category forecast with what-if scenario adjustments: baseline and
/// adjusted totals for every requested date
pub async fn predict_params(
    State(state): State<AppState>,
    Json(req): Json<ScenarioRequest>,
) -> Result<Json<ScenarioResponse>, ApiError> {
    let model = require_model(&state)?;
    let dates = parse_time_range(&req.time_range)?;
    let transactions = fetch_history(&state, &req.user_id, dates[0]).await?;

    let scenario = req.scenario;
    let config = AggregatorConfig {
        num_samples: state.num_samples,
        ..AggregatorConfig::default()
    };
    let outcome = tokio::task::spawn_blocking(move || {
        let forecasts = forecast_by_category(model.as_ref(), &transactions, &dates, &config)?;
        Ok::<_, OracleError>(apply_scenario(
            &forecasts.baseline,
            &forecasts.categories,
            &scenario,
        ))
    })
    .await
    .map_err(|err| ApiError::internal(format!("forecast task failed: {err}")))??;

    Ok(Json(ScenarioResponse {
        user_id: req.user_id,
        predictions_without_param: outcome.baseline,
        predictions_with_param: outcome.adjusted,
    }))
}
