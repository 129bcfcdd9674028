use axum::{
    extract::State,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;

use super::AppError;

// ─── Request / response types ────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkConfig {
    /// Number of concurrent Tokio tasks generating load
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,

    /// How long the benchmark runs (seconds)
    #[serde(default = "default_duration")]
    pub duration_secs: u64,

    /// Endpoints to exercise; the server's configured list when omitted
    #[serde(default)]
    pub endpoints: Option<Vec<String>>,
}

fn default_concurrency() -> u32 {
    4
}
fn default_duration() -> u64 {
    10
}

#[derive(Debug, Serialize)]
pub struct BenchmarkStatus {
    pub running: bool,
    pub run_id: Option<Uuid>,
    pub message: String,
}

// ─── POST /api/benchmark/start ───────────────────────────────────

pub async fn start_benchmark(
    State(state): State<Arc<AppState>>,
    Json(config): Json<BenchmarkConfig>,
) -> Result<Json<BenchmarkStatus>, AppError> {
    // Guard: only one benchmark at a time
    if state.load_running.load(Ordering::SeqCst) {
        return Err(AppError::AlreadyRunning);
    }

    if config.concurrency == 0 || config.concurrency > 500 {
        return Err(AppError::BadRequest(
            "concurrency must be between 1 and 500".into(),
        ));
    }
    if config.duration_secs == 0 || config.duration_secs > 300 {
        return Err(AppError::BadRequest(
            "duration_secs must be between 1 and 300".into(),
        ));
    }
    let endpoints: Arc<[String]> = match config.endpoints {
        Some(list) if list.is_empty() => {
            return Err(AppError::BadRequest(
                "endpoints must not be empty".into(),
            ));
        }
        Some(list) => list.into(),
        None => state.endpoints.clone(),
    };

    // Fresh samples for every run
    state.analytics.reset();

    // Flip the flag BEFORE spawning so workers see it immediately
    state.load_running.store(true, Ordering::SeqCst);

    let run_id = Uuid::new_v4();
    let msg = format!(
        "Started: {} workers × {}s across {} endpoints",
        config.concurrency,
        config.duration_secs,
        endpoints.len(),
    );
    tracing::info!(
        %run_id,
        concurrency = config.concurrency,
        duration_secs = config.duration_secs,
        "benchmark started"
    );

    let running = state.load_running.clone();
    let analytics = state.analytics.clone();
    let backend = state.backend.clone();
    let concurrency = config.concurrency;
    let duration_secs = config.duration_secs;

    let handle = tokio::spawn(async move {
        crate::load_generator::run(
            running,
            analytics,
            backend,
            endpoints,
            concurrency,
            duration_secs,
        )
        .await;
    });

    // Stash the handle so `stop` can await clean shutdown
    let mut guard = state.load_handle.lock().await;
    *guard = Some(handle);

    Ok(Json(BenchmarkStatus {
        running: true,
        run_id: Some(run_id),
        message: msg,
    }))
}

// ─── POST /api/benchmark/stop ────────────────────────────────────

pub async fn stop_benchmark(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BenchmarkStatus>, AppError> {
    if !state.load_running.load(Ordering::SeqCst) {
        return Ok(Json(BenchmarkStatus {
            running: false,
            run_id: None,
            message: "No benchmark is running".into(),
        }));
    }

    state.load_running.store(false, Ordering::SeqCst);

    // Await the load-generator task so we know it's fully stopped
    let mut guard = state.load_handle.lock().await;
    if let Some(handle) = guard.take() {
        // Ignore JoinError: the task may have already finished
        let _ = handle.await;
    }
    tracing::info!("benchmark stopped");

    Ok(Json(BenchmarkStatus {
        running: false,
        run_id: None,
        message: "Benchmark stopped".into(),
    }))
}

// ─── GET /api/benchmark/status ───────────────────────────────────

pub async fn benchmark_status(
    State(state): State<Arc<AppState>>,
) -> Json<BenchmarkStatus> {
    let running = state.load_running.load(Ordering::SeqCst);
    Json(BenchmarkStatus {
        running,
        run_id: None,
        message: if running {
            "Benchmark in progress".into()
        } else {
            "Idle".into()
        },
    })
}
