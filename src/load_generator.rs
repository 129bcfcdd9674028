use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::metrics::LatencyAnalytics;
use crate::simulator::Processor;
use crate::timing::timed_process;

// ─── Public entry point ──────────────────────────────────────────

/// Spawns `concurrency` Tokio tasks that call the backend on randomly
/// chosen endpoints until the deadline or the `running` flag is cleared.
pub async fn run<P: Processor + 'static>(
    running: Arc<AtomicBool>,
    analytics: Arc<LatencyAnalytics>,
    backend: Arc<P>,
    endpoints: Arc<[String]>,
    concurrency: u32,
    duration_secs: u64,
) {
    let deadline = Instant::now() + Duration::from_secs(duration_secs);

    let mut handles = Vec::with_capacity(concurrency as usize);

    for worker_id in 0..concurrency {
        let running = running.clone();
        let analytics = analytics.clone();
        let backend = backend.clone();
        let endpoints = endpoints.clone();

        handles.push(tokio::spawn(async move {
            worker(worker_id, running, analytics, backend, endpoints, deadline).await;
        }));
    }

    // Wait for all workers to finish
    for h in handles {
        let _ = h.await;
    }

    running.store(false, Ordering::SeqCst);
    tracing::info!(concurrency, "load generator finished");
}

// ─── Worker loop ─────────────────────────────────────────────────

async fn worker<P: Processor>(
    id: u32,
    running: Arc<AtomicBool>,
    analytics: Arc<LatencyAnalytics>,
    backend: Arc<P>,
    endpoints: Arc<[String]>,
    deadline: Instant,
) {
    if endpoints.is_empty() {
        return;
    }

    // Each worker gets its own deterministic RNG seeded uniquely.
    let mut rng = StdRng::seed_from_u64(1000 + id as u64);

    while running.load(Ordering::Relaxed) && Instant::now() < deadline {
        let endpoint = &endpoints[rng.gen_range(0..endpoints.len())];
        if let Err(e) = timed_process(backend.as_ref(), &analytics, endpoint).await {
            tracing::warn!(worker = id, error = %e, "dropping sample");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TenMillis;

    impl Processor for TenMillis {
        async fn process(&self, _endpoint: &str) -> String {
            tokio::time::sleep(Duration::from_millis(10)).await;
            String::new()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn workers_stop_at_deadline() {
        let running = Arc::new(AtomicBool::new(true));
        let analytics = Arc::new(LatencyAnalytics::default());
        let endpoints: Arc<[String]> = vec!["uri1".to_owned(), "uri2".to_owned()].into();

        run(
            running.clone(),
            analytics.clone(),
            Arc::new(TenMillis),
            endpoints,
            2,
            1,
        )
        .await;

        assert!(!running.load(Ordering::SeqCst));
        let total: usize = analytics.samples().values().map(Vec::len).sum();
        // two workers, 1 s of 10 ms calls each
        assert!((180..=200).contains(&total), "recorded {total} samples");
    }
}
