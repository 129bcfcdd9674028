//! Per-endpoint latency analytics: sample recording, mean / standard
//! deviation, Z-score normalization and adaptive histogram binning,
//! served over a small HTTP API.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub mod config;
pub mod error;
pub mod handlers;
pub mod load_generator;
pub mod metrics;
pub mod middleware;
pub mod server;
pub mod simulator;
pub mod timing;

pub use config::{BinConfig, LatencyParams, LatencyProfile};
pub use error::{AnalyticsError, Result};
pub use metrics::{BinMode, Bucket, Histogram, LatencyAnalytics};
pub use simulator::{Processor, SimulatedBackend};

/// Shared application state available to every handler via `State<Arc<AppState>>`.
pub struct AppState {
    /// Central analytics engine. Every sample lands here.
    pub analytics: Arc<LatencyAnalytics>,

    /// Upstream being measured.
    pub backend: Arc<SimulatedBackend>,

    /// Endpoints the load generator exercises when a run names none.
    pub endpoints: Arc<[String]>,

    /// Flag checked by every load-generator worker on each iteration.
    pub load_running: Arc<AtomicBool>,

    /// Handle to the spawned load-generator task so we can await clean shutdown.
    pub load_handle: tokio::sync::Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl AppState {
    /// Default endpoints are the ones the backend's profile names.
    pub fn new(analytics: Arc<LatencyAnalytics>, backend: Arc<SimulatedBackend>) -> Self {
        let endpoints: Vec<String> = backend.profile().endpoints.keys().cloned().collect();
        Self {
            analytics,
            backend,
            endpoints: endpoints.into(),
            load_running: Arc::new(AtomicBool::new(false)),
            load_handle: tokio::sync::Mutex::new(None),
        }
    }
}
