use std::collections::BTreeMap;

use super::stats::{mean_all, mean_of, std_dev_all_with, std_dev_of};
use super::store::SampleStore;
use crate::error::Result;

/// Z-scores for one endpoint, aligned 1:1 with its recorded samples.
pub fn normalize(store: &SampleStore, endpoint: &str) -> Result<Vec<f64>> {
    let samples = store.samples_for(endpoint)?;
    let mean = mean_of(samples);
    Ok(z_scores(samples, mean, std_dev_of(samples, mean)))
}

/// Z-scores for every endpoint; empty map for an empty store.
pub fn normalize_all(store: &SampleStore) -> BTreeMap<String, Vec<f64>> {
    let means = mean_all(store);
    let std_devs = std_dev_all_with(store, &means);

    store
        .iter()
        .filter_map(|(endpoint, samples)| {
            let mean = *means.get(endpoint)?;
            let std_dev = *std_devs.get(endpoint)?;
            Some((endpoint.to_owned(), z_scores(samples, mean, std_dev)))
        })
        .collect()
}

/// `(x − mean) / std_dev` per sample.
///
/// Fewer than two samples: returned unchanged. Two or more identical
/// samples (zero spread): every sample sits on the mean, so all zeros.
fn z_scores(samples: &[f64], mean: f64, std_dev: f64) -> Vec<f64> {
    if samples.len() < 2 {
        return samples.to_vec();
    }
    if std_dev == 0.0 {
        return vec![0.0; samples.len()];
    }
    samples.iter().map(|x| (x - mean) / std_dev).collect()
}
