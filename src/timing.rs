use tokio::time::Instant;

use crate::error::Result;
use crate::metrics::LatencyAnalytics;
use crate::simulator::Processor;

/// Outcome of one timed call.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedCall {
    pub response: String,
    pub elapsed_ms: f64,
}

/// Run `processor.process(endpoint)`, record its wall-clock time in
/// milliseconds against `endpoint`, and hand back the response.
pub async fn timed_process<P: Processor>(
    processor: &P,
    analytics: &LatencyAnalytics,
    endpoint: &str,
) -> Result<TimedCall> {
    let t0 = Instant::now();
    let response = processor.process(endpoint).await;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;

    analytics.record(endpoint, elapsed_ms)?;
    tracing::debug!(endpoint, elapsed_ms, "recorded request latency");

    Ok(TimedCall {
        response,
        elapsed_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Sleeps a fixed number of milliseconds per call.
    struct FixedDelay(u64);

    impl Processor for FixedDelay {
        async fn process(&self, _endpoint: &str) -> String {
            tokio::time::sleep(Duration::from_millis(self.0)).await;
            "ok".to_owned()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn records_elapsed_time_per_endpoint() {
        let analytics = LatencyAnalytics::default();

        let call = timed_process(&FixedDelay(12), &analytics, "uri1").await.unwrap();
        timed_process(&FixedDelay(30), &analytics, "uri2").await.unwrap();

        assert_eq!(call.response, "ok");
        let samples = analytics.samples();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples["uri1"].len(), 1);
        assert!((samples["uri1"][0] - 12.0).abs() < 1.0);
        assert!((samples["uri2"][0] - 30.0).abs() < 1.0);
    }
}
