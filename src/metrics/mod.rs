pub mod collector;
pub mod histogram;
pub mod normalize;
pub mod stats;
pub mod store;
pub mod stream;

pub use collector::{AnalyticsSnapshot, LatencyAnalytics};
pub use histogram::{BinMode, Bucket, Histogram, HistogramBinner};
pub use stats::EndpointSummary;
pub use store::SampleStore;
