use axum::{
    middleware as axum_mw,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::metrics::stream;
use crate::middleware::timing;
use crate::AppState;

/// Builds the full Axum `Router` with all routes and middleware.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // ── Sample intake ───────────────────────────────────────
        .route("/api/samples", post(handlers::analytics::record_sample))
        .route(
            "/api/process/:endpoint",
            post(handlers::analytics::process_once),
        )
        // ── Derived statistics ──────────────────────────────────
        .route("/api/stats", get(handlers::analytics::get_stats))
        .route(
            "/api/stats/:endpoint",
            get(handlers::analytics::get_endpoint_stats),
        )
        .route("/api/normalized", get(handlers::analytics::get_normalized))
        .route("/api/histogram", get(handlers::analytics::get_histograms))
        .route(
            "/api/config/max-bins",
            get(handlers::analytics::get_max_bins)
                .put(handlers::analytics::set_max_bins),
        )
        // ── Benchmark control ───────────────────────────────────
        .route(
            "/api/benchmark/start",
            post(handlers::benchmark::start_benchmark),
        )
        .route(
            "/api/benchmark/stop",
            post(handlers::benchmark::stop_benchmark),
        )
        .route(
            "/api/benchmark/status",
            get(handlers::benchmark::benchmark_status),
        )
        // ── Snapshots ───────────────────────────────────────────
        .route("/api/metrics", get(stream::get_metrics))
        .route("/api/metrics/stream", get(stream::metrics_stream))
        .with_state(state)
        // ── Global middleware (applied bottom-up) ───────────────
        .layer(axum_mw::from_fn(timing::timing_middleware))
        .layer(CorsLayer::permissive())
}
