use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use rust_latency_stats::{
    server, AppState, BinConfig, LatencyAnalytics, LatencyProfile, SimulatedBackend,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "rust-latency-stats", about = "Per-endpoint latency analytics server")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:3000")]
    addr: SocketAddr,

    /// Maximum number of histogram buckets per endpoint.
    #[arg(long, default_value_t = rust_latency_stats::config::DEFAULT_MAX_BINS)]
    max_bins: usize,

    /// Seed for the simulated backend's latency generator.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // ── 1. Analytics engine ──────────────────────────────────────
    let bins = BinConfig::new(args.max_bins)?;
    let analytics = Arc::new(LatencyAnalytics::new(bins));

    // ── 2. Simulated upstream ────────────────────────────────────
    let backend = Arc::new(SimulatedBackend::new(LatencyProfile::default(), args.seed));

    // ── 3. Router ────────────────────────────────────────────────
    let state = Arc::new(AppState::new(analytics, backend));
    let app = server::create_router(state);

    // ── 4. Bind & serve ──────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(
        addr = %local_addr,
        max_bins = args.max_bins,
        "latency analytics server listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
