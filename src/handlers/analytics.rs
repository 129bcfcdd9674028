use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::metrics::{EndpointSummary, Histogram};
use crate::timing::timed_process;
use crate::AppState;

use super::AppError;

// ─── Request / response types ────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct RecordRequest {
    pub endpoint: String,
    pub latency_ms: f64,
}

#[derive(Debug, Serialize)]
pub struct RecordResponse {
    pub endpoint: String,
    pub samples: usize,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub response: String,
    pub elapsed_ms: f64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub means: BTreeMap<String, f64>,
    pub std_devs: BTreeMap<String, f64>,
    pub summaries: BTreeMap<String, EndpointSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxBins {
    pub max_bins: usize,
}

// ─── POST /api/samples ───────────────────────────────────────────

pub async fn record_sample(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RecordRequest>,
) -> Result<Json<RecordResponse>, AppError> {
    state
        .analytics
        .record(&req.endpoint, req.latency_ms)
        .map_err(|e| {
            tracing::warn!(endpoint = %req.endpoint, error = %e, "rejected sample");
            e
        })?;

    let samples = state
        .analytics
        .summary(&req.endpoint)
        .map(|s| s.count)
        .unwrap_or(0);

    Ok(Json(RecordResponse {
        endpoint: req.endpoint,
        samples,
    }))
}

// ─── POST /api/process/:endpoint ─────────────────────────────────

pub async fn process_once(
    State(state): State<Arc<AppState>>,
    Path(endpoint): Path<String>,
) -> Result<Json<ProcessResponse>, AppError> {
    let call = timed_process(state.backend.as_ref(), &state.analytics, &endpoint).await?;
    Ok(Json(ProcessResponse {
        response: call.response,
        elapsed_ms: call.elapsed_ms,
    }))
}

// ─── GET /api/stats ──────────────────────────────────────────────

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    Json(StatsResponse {
        means: state.analytics.mean_all(),
        std_devs: state.analytics.std_dev_all(),
        summaries: state.analytics.summary_all(),
    })
}

// ─── GET /api/stats/:endpoint ────────────────────────────────────

pub async fn get_endpoint_stats(
    State(state): State<Arc<AppState>>,
    Path(endpoint): Path<String>,
) -> Result<Json<EndpointSummary>, AppError> {
    Ok(Json(state.analytics.summary(&endpoint)?))
}

// ─── GET /api/normalized ─────────────────────────────────────────

pub async fn get_normalized(
    State(state): State<Arc<AppState>>,
) -> Json<BTreeMap<String, Vec<f64>>> {
    Json(state.analytics.normalize_all())
}

// ─── GET /api/histogram ──────────────────────────────────────────

pub async fn get_histograms(
    State(state): State<Arc<AppState>>,
) -> Json<BTreeMap<String, Histogram>> {
    Json(state.analytics.histogram_all())
}

// ─── GET|PUT /api/config/max-bins ────────────────────────────────

pub async fn get_max_bins(State(state): State<Arc<AppState>>) -> Json<MaxBins> {
    Json(MaxBins {
        max_bins: state.analytics.max_bins(),
    })
}

pub async fn set_max_bins(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MaxBins>,
) -> Result<Json<MaxBins>, AppError> {
    state.analytics.set_max_bins(req.max_bins)?;
    tracing::info!(max_bins = req.max_bins, "histogram bin limit updated");
    Ok(Json(req))
}
