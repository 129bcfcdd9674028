use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

use super::histogram::{Histogram, HistogramBinner};
use super::stats::{self, EndpointSummary};
use super::normalize;
use super::store::SampleStore;
use crate::config::BinConfig;
use crate::error::{AnalyticsError, Result};

// ─── Public types ────────────────────────────────────────────────

/// Thread-safe analytics engine.
///
/// Every operation takes the same lock, so a statistic is always derived
/// from one consistent view of the sample history. Nothing derived is
/// cached: each call recomputes from the raw samples.
pub struct LatencyAnalytics {
    inner: Mutex<Inner>,
}

/// Everything a dashboard needs for one refresh.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSnapshot {
    pub generated_at: DateTime<Utc>,
    pub max_bins: usize,
    pub total_samples: usize,
    pub summaries: BTreeMap<String, EndpointSummary>,
    pub histograms: BTreeMap<String, Histogram>,
}

// ─── Internal state ──────────────────────────────────────────────

struct Inner {
    store: SampleStore,
    binner: HistogramBinner,
}

// ─── LatencyAnalytics impl ───────────────────────────────────────

impl LatencyAnalytics {
    pub fn new(config: BinConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                store: SampleStore::new(),
                binner: HistogramBinner::new(config),
            }),
        }
    }

    /// Record one observed latency (ms) for `endpoint`.
    pub fn record(&self, endpoint: &str, latency_ms: f64) -> Result<()> {
        self.inner.lock().store.record(endpoint, latency_ms)
    }

    pub fn mean(&self, endpoint: &str) -> Result<f64> {
        stats::mean(&self.inner.lock().store, endpoint)
    }

    pub fn mean_all(&self) -> BTreeMap<String, f64> {
        stats::mean_all(&self.inner.lock().store)
    }

    pub fn std_dev(&self, endpoint: &str) -> Result<f64> {
        stats::std_dev(&self.inner.lock().store, endpoint)
    }

    pub fn std_dev_all(&self) -> BTreeMap<String, f64> {
        stats::std_dev_all(&self.inner.lock().store)
    }

    pub fn summary(&self, endpoint: &str) -> Result<EndpointSummary> {
        stats::summary(&self.inner.lock().store, endpoint)
    }

    pub fn summary_all(&self) -> BTreeMap<String, EndpointSummary> {
        stats::summary_all(&self.inner.lock().store)
    }

    pub fn normalize(&self, endpoint: &str) -> Result<Vec<f64>> {
        normalize::normalize(&self.inner.lock().store, endpoint)
    }

    pub fn normalize_all(&self) -> BTreeMap<String, Vec<f64>> {
        normalize::normalize_all(&self.inner.lock().store)
    }

    pub fn histogram(&self, endpoint: &str) -> Result<Histogram> {
        self.inner.lock().histogram(endpoint)
    }

    /// Histograms for every endpoint with samples; empty map when the
    /// store is empty.
    pub fn histogram_all(&self) -> BTreeMap<String, Histogram> {
        self.inner.lock().histogram_all()
    }

    pub fn max_bins(&self) -> usize {
        self.inner.lock().binner.max_bins()
    }

    pub fn set_max_bins(&self, max_bins: usize) -> Result<()> {
        self.inner.lock().binner.set_max_bins(max_bins)
    }

    /// Copy of the raw per-endpoint history.
    pub fn samples(&self) -> BTreeMap<String, Vec<f64>> {
        self.inner.lock().store.snapshot()
    }

    /// Wipe all samples; called when a new benchmark run starts.
    /// The bin configuration is kept.
    pub fn reset(&self) {
        self.inner.lock().store = SampleStore::new();
    }

    pub fn snapshot(&self) -> AnalyticsSnapshot {
        self.inner.lock().snapshot()
    }
}

impl Default for LatencyAnalytics {
    fn default() -> Self {
        Self::new(BinConfig::default())
    }
}

// ─── Inner impl ──────────────────────────────────────────────────

impl Inner {
    fn histogram(&self, endpoint: &str) -> Result<Histogram> {
        let normalized = normalize::normalize(&self.store, endpoint)?;
        // Non-empty by construction, so the binner always yields a value.
        self.binner
            .histogram(&normalized)
            .ok_or_else(|| AnalyticsError::NoData(endpoint.to_owned()))
    }

    fn histogram_all(&self) -> BTreeMap<String, Histogram> {
        self.binner
            .histogram_all(&normalize::normalize_all(&self.store))
    }

    fn snapshot(&self) -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            generated_at: Utc::now(),
            max_bins: self.binner.max_bins(),
            total_samples: self.store.iter().map(|(_, s)| s.len()).sum(),
            summaries: stats::summary_all(&self.store),
            histograms: self.histogram_all(),
        }
    }
}
