use std::collections::BTreeMap;

use serde::Serialize;

use super::store::SampleStore;
use crate::error::Result;

/// Per-endpoint summary served alongside the histograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EndpointSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

// ─── Slice-level helpers ─────────────────────────────────────────

/// Arithmetic mean. Callers guarantee `samples` is non-empty.
pub(crate) fn mean_of(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Sample standard deviation (n − 1 denominator) around a precomputed
/// mean. A single sample has a standard deviation of exactly 0.0.
pub(crate) fn std_dev_of(samples: &[f64], mean: f64) -> f64 {
    let n = samples.len();
    if n < 2 {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|x| (x - mean).powi(2)).sum();
    (sum_sq / (n - 1) as f64).sqrt()
}

// ─── Store-level operations ──────────────────────────────────────

pub fn mean(store: &SampleStore, endpoint: &str) -> Result<f64> {
    Ok(mean_of(store.samples_for(endpoint)?))
}

/// Means for every endpoint; empty map for an empty store.
pub fn mean_all(store: &SampleStore) -> BTreeMap<String, f64> {
    store
        .iter()
        .map(|(endpoint, samples)| (endpoint.to_owned(), mean_of(samples)))
        .collect()
}

pub fn std_dev(store: &SampleStore, endpoint: &str) -> Result<f64> {
    let samples = store.samples_for(endpoint)?;
    Ok(std_dev_of(samples, mean_of(samples)))
}

/// Standard deviations for every endpoint, computed around the exact
/// values `mean_all` returns for the same store.
pub fn std_dev_all(store: &SampleStore) -> BTreeMap<String, f64> {
    std_dev_all_with(store, &mean_all(store))
}

pub(crate) fn std_dev_all_with(
    store: &SampleStore,
    means: &BTreeMap<String, f64>,
) -> BTreeMap<String, f64> {
    store
        .iter()
        .filter_map(|(endpoint, samples)| {
            let mean = *means.get(endpoint)?;
            Some((endpoint.to_owned(), std_dev_of(samples, mean)))
        })
        .collect()
}

pub fn summary(store: &SampleStore, endpoint: &str) -> Result<EndpointSummary> {
    Ok(summarize(store.samples_for(endpoint)?))
}

pub fn summary_all(store: &SampleStore) -> BTreeMap<String, EndpointSummary> {
    store
        .iter()
        .map(|(endpoint, samples)| (endpoint.to_owned(), summarize(samples)))
        .collect()
}

fn summarize(samples: &[f64]) -> EndpointSummary {
    let mean = mean_of(samples);
    EndpointSummary {
        count: samples.len(),
        min: samples.iter().copied().fold(f64::INFINITY, f64::min),
        max: samples.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        mean,
        std_dev: std_dev_of(samples, mean),
    }
}
