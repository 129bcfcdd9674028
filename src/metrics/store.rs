use std::collections::BTreeMap;

use crate::error::{AnalyticsError, Result};

/// Append-only per-endpoint sample history (latencies in ms).
///
/// A key exists only once a sample has been recorded for it, so every
/// stored sequence is non-empty. Keys are compared verbatim.
#[derive(Debug, Clone, Default)]
pub struct SampleStore {
    samples: BTreeMap<String, Vec<f64>>,
}

impl SampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one latency sample, creating the endpoint's sequence lazily.
    pub fn record(&mut self, endpoint: &str, latency_ms: f64) -> Result<()> {
        if !latency_ms.is_finite() || latency_ms < 0.0 {
            return Err(AnalyticsError::InvalidSample(latency_ms));
        }
        match self.samples.get_mut(endpoint) {
            Some(seq) => seq.push(latency_ms),
            None => {
                self.samples.insert(endpoint.to_owned(), vec![latency_ms]);
            }
        }
        Ok(())
    }

    pub fn samples_for(&self, endpoint: &str) -> Result<&[f64]> {
        self.samples
            .get(endpoint)
            .map(Vec::as_slice)
            .ok_or_else(|| AnalyticsError::NoData(endpoint.to_owned()))
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of endpoints with at least one sample.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.samples.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.samples
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Owned copy of the full history, in endpoint-key order.
    pub fn snapshot(&self) -> BTreeMap<String, Vec<f64>> {
        self.samples.clone()
    }
}
