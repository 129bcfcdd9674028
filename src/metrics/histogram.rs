use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::BinConfig;
use crate::error::Result;

/// Gap inserted between successive range starts so a value sitting on an
/// internal boundary falls into exactly one inclusive `[start, end]` range.
const RANGE_EPSILON: f64 = 1e-13;

// ─── Public types ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinMode {
    /// One bucket per distinct value.
    Exact,
    /// `max_bins` equal-width ranges between min and max.
    Range,
}

/// One bar of the distribution. In exact mode `start == end`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub start: f64,
    pub end: f64,
    pub count: u64,
}

/// Ordered buckets for one endpoint. Kept as a list rather than a
/// label-keyed map so two ranges that round to the same label never
/// merge their counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub mode: BinMode,
    pub buckets: Vec<Bucket>,
}

impl Histogram {
    /// Sum of all bucket counts; always the number of input values.
    pub fn total(&self) -> u64 {
        self.buckets.iter().map(|b| b.count).sum()
    }

    /// `(label, count)` pairs in bucket order, the shape a bar-chart
    /// renderer consumes.
    pub fn counts(&self) -> Vec<(&str, u64)> {
        self.buckets
            .iter()
            .map(|b| (b.label.as_str(), b.count))
            .collect()
    }
}

// ─── Binner ──────────────────────────────────────────────────────

/// Turns normalized samples into at most `max_bins` labelled buckets.
#[derive(Debug, Clone, Default)]
pub struct HistogramBinner {
    config: BinConfig,
}

impl HistogramBinner {
    pub fn new(config: BinConfig) -> Self {
        Self { config }
    }

    pub fn max_bins(&self) -> usize {
        self.config.max_bins()
    }

    pub fn set_max_bins(&mut self, max_bins: usize) -> Result<()> {
        self.config.set_max_bins(max_bins)
    }

    /// `None` for an empty input; endpoints without samples get no entry.
    pub fn histogram(&self, values: &[f64]) -> Option<Histogram> {
        if values.is_empty() {
            return None;
        }

        let distinct = distinct_counts(values);
        let max_bins = self.max_bins();

        let histogram = if distinct.len() <= max_bins {
            Histogram {
                mode: BinMode::Exact,
                buckets: distinct
                    .into_iter()
                    .map(|(value, count)| Bucket {
                        label: value.to_string(),
                        start: value,
                        end: value,
                        count,
                    })
                    .collect(),
            }
        } else {
            Histogram {
                mode: BinMode::Range,
                buckets: range_buckets(values, max_bins),
            }
        };
        Some(histogram)
    }

    pub fn histogram_all(
        &self,
        normalized: &BTreeMap<String, Vec<f64>>,
    ) -> BTreeMap<String, Histogram> {
        normalized
            .iter()
            .filter_map(|(endpoint, values)| {
                self.histogram(values).map(|h| (endpoint.clone(), h))
            })
            .collect()
    }
}

// ─── Exact mode ──────────────────────────────────────────────────

/// Distinct values in ascending order with their multiplicities.
/// `-0.0` and `0.0` count as the same value.
fn distinct_counts(values: &[f64]) -> Vec<(f64, u64)> {
    let mut sorted: Vec<f64> = values.iter().map(|v| v + 0.0).collect();
    sorted.sort_by(f64::total_cmp);

    let mut out: Vec<(f64, u64)> = Vec::new();
    for v in sorted {
        match out.last_mut() {
            Some((last, count)) if last.total_cmp(&v) == Ordering::Equal => *count += 1,
            _ => out.push((v, 1)),
        }
    }
    out
}

// ─── Range mode ──────────────────────────────────────────────────

/// Exactly `max_bins` ranges. The i-th starts at `min + i·(width + ε)`
/// and spans `width`; a value is counted in the first range containing
/// it (inclusive both ends). A value that rounding leaves between two
/// ranges goes to the last range starting at or below it, so every
/// value is counted exactly once.
fn range_buckets(values: &[f64], max_bins: usize) -> Vec<Bucket> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / max_bins as f64;

    let mut buckets: Vec<Bucket> = (0..max_bins)
        .map(|i| {
            let start = min + i as f64 * (width + RANGE_EPSILON);
            let end = start + width;
            Bucket {
                label: format!("{}~{}", round2(start), round2(end)),
                start,
                end,
                count: 0,
            }
        })
        .collect();

    for &v in values {
        let idx = buckets
            .iter()
            .position(|b| b.start <= v && v <= b.end)
            .or_else(|| buckets.iter().rposition(|b| b.start <= v))
            .unwrap_or(0);
        buckets[idx].count += 1;
    }
    buckets
}

/// Two-decimal rounding used in range labels; never yields `-0`.
fn round2(x: f64) -> f64 {
    let r = (x * 100.0).round() / 100.0;
    if r == 0.0 {
        0.0
    } else {
        r
    }
}
