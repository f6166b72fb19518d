//! Request handlers

use super::AppState;
use super::error::ApiResult;
use crate::domain::errors::ScoringError;
use crate::domain::risk::RiskAssessment;
use crate::domain::transaction::TransactionRecord;
use crate::infrastructure::observability::LatencyGuard;
use crate::infrastructure::observability::metrics::{
    ENDPOINT_PREDICT, ENDPOINT_PREDICT_BATCH, OUTCOME_ERROR, OUTCOME_INVALID, OUTCOME_OK,
    OUTCOME_UNAVAILABLE,
};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    pub items: Vec<TransactionRecord>,
}

/// Liveness only; does not depend on the model.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<TransactionRecord>, JsonRejection>,
) -> ApiResult<Json<RiskAssessment>> {
    let Json(record) = payload
        .inspect_err(|_| state.metrics.inc_requests(ENDPOINT_PREDICT, OUTCOME_INVALID))?;

    let result = {
        let _timer = LatencyGuard::new(&state.metrics, ENDPOINT_PREDICT);
        state.service.score_one(&record)
    };
    state
        .metrics
        .inc_requests(ENDPOINT_PREDICT, outcome(result.as_ref().err()));

    let assessment = result?;
    state
        .metrics
        .inc_predictions(assessment.risk_label.as_str());
    Ok(Json(assessment))
}

pub async fn predict_batch(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> ApiResult<Json<Vec<RiskAssessment>>> {
    let Json(request) = payload.inspect_err(|_| {
        state
            .metrics
            .inc_requests(ENDPOINT_PREDICT_BATCH, OUTCOME_INVALID)
    })?;

    let result = {
        let _timer = LatencyGuard::new(&state.metrics, ENDPOINT_PREDICT_BATCH);
        state.service.score_batch(&request.items)
    };
    state
        .metrics
        .inc_requests(ENDPOINT_PREDICT_BATCH, outcome(result.as_ref().err()));

    let assessments = result?;
    state.metrics.batch_size.observe(assessments.len() as f64);
    for assessment in &assessments {
        state
            .metrics
            .inc_predictions(assessment.risk_label.as_str());
    }
    Ok(Json(assessments))
}

fn outcome(err: Option<&ScoringError>) -> &'static str {
    match err {
        None => OUTCOME_OK,
        Some(ScoringError::Validation(_)) => OUTCOME_INVALID,
        Some(ScoringError::ModelUnavailable { .. }) => OUTCOME_UNAVAILABLE,
        Some(ScoringError::Classifier(_)) => OUTCOME_ERROR,
    }
}
