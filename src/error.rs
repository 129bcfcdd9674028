use thiserror::Error;

/// Errors surfaced by the analytics engine.
///
/// "No data yet" is only an error for single-endpoint lookups; the
/// `*_all` operations treat an empty store as a normal state and return
/// empty maps instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    #[error("No samples recorded for endpoint: {0}")]
    NoData(String),

    #[error("max_bins must be at least 1, got {0}")]
    InvalidMaxBins(usize),

    #[error("Latency sample must be a finite, non-negative number, got {0}")]
    InvalidSample(f64),
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
