use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};

// ─── Histogram configuration ─────────────────────────────────────

/// Default upper bound on buckets per endpoint histogram.
pub const DEFAULT_MAX_BINS: usize = 5;

/// Validated binning configuration. `max_bins` is always ≥ 1, so the
/// range-mode bin width never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BinConfig {
    max_bins: usize,
}

impl BinConfig {
    pub fn new(max_bins: usize) -> Result<Self> {
        let mut config = Self {
            max_bins: DEFAULT_MAX_BINS,
        };
        config.set_max_bins(max_bins)?;
        Ok(config)
    }

    pub fn max_bins(&self) -> usize {
        self.max_bins
    }

    /// Rejects `0`; the previous value is kept on error.
    pub fn set_max_bins(&mut self, max_bins: usize) -> Result<()> {
        if max_bins == 0 {
            return Err(AnalyticsError::InvalidMaxBins(max_bins));
        }
        self.max_bins = max_bins;
        Ok(())
    }
}

impl Default for BinConfig {
    fn default() -> Self {
        Self {
            max_bins: DEFAULT_MAX_BINS,
        }
    }
}

// ─── Simulated latency profile ───────────────────────────────────

/// Gaussian parameters for one endpoint's simulated latency (μs).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyParams {
    pub mean_us: f64,
    pub std_dev_us: f64,
}

impl LatencyParams {
    pub const fn new(mean_us: f64, std_dev_us: f64) -> Self {
        Self {
            mean_us,
            std_dev_us,
        }
    }
}

/// Immutable per-endpoint latency table handed to the simulated backend.
/// Endpoints without an entry fall back to `default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyProfile {
    pub endpoints: BTreeMap<String, LatencyParams>,
    pub default: LatencyParams,
}

impl LatencyProfile {
    pub fn new(default: LatencyParams) -> Self {
        Self {
            endpoints: BTreeMap::new(),
            default,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>, params: LatencyParams) -> Self {
        self.endpoints.insert(endpoint.into(), params);
        self
    }

    pub fn params_for(&self, endpoint: &str) -> LatencyParams {
        self.endpoints.get(endpoint).copied().unwrap_or(self.default)
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::new(LatencyParams::new(15_000.0, 5_000.0))
            .with_endpoint("uri1", LatencyParams::new(10_000.0, 2_500.0))
            .with_endpoint("uri2", LatencyParams::new(20_000.0, 7_500.0))
    }
}
