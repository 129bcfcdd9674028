use rust_latency_stats::{AnalyticsError, BinConfig, BinMode, LatencyAnalytics};

// --- Test helpers ---

fn engine() -> LatencyAnalytics {
    LatencyAnalytics::new(BinConfig::new(5).unwrap())
}

fn record_all(analytics: &LatencyAnalytics, endpoint: &str, values: &[f64]) {
    for v in values {
        analytics.record(endpoint, *v).unwrap();
    }
}

fn sample_std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    (values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
}

// --- Configuration ---

#[test]
fn test_init_and_set_max_bins() {
    let analytics = engine();
    assert_eq!(analytics.max_bins(), 5);
    analytics.set_max_bins(11).unwrap();
    assert_eq!(analytics.max_bins(), 11);
}

#[test]
fn test_zero_max_bins_is_rejected() {
    let analytics = engine();
    assert_eq!(
        analytics.set_max_bins(0),
        Err(AnalyticsError::InvalidMaxBins(0))
    );
    assert_eq!(analytics.max_bins(), 5);
}

// --- Recording ---

#[test]
fn test_record_keeps_one_sequence_per_endpoint() {
    let analytics = engine();
    analytics.record("uri1", 10.4).unwrap();
    analytics.record("uri2", 21.9).unwrap();

    let samples = analytics.samples();
    assert_eq!(samples.len(), 2);
    assert_eq!(samples["uri1"], vec![10.4]);
    assert_eq!(samples["uri2"], vec![21.9]);
}

// --- Empty store ---

#[test]
fn test_empty_store_yields_empty_results() {
    let analytics = engine();
    assert!(analytics.mean_all().is_empty());
    assert!(analytics.std_dev_all().is_empty());
    assert!(analytics.normalize_all().is_empty());
    assert!(analytics.histogram_all().is_empty());
    assert_eq!(
        analytics.histogram("uri1"),
        Err(AnalyticsError::NoData("uri1".into()))
    );
}

// --- Mean / standard deviation ---

#[test]
fn test_single_sample_endpoint() {
    let analytics = engine();
    analytics.record("uri2", 17.25).unwrap();

    assert_eq!(analytics.mean("uri2").unwrap(), 17.25);
    assert_eq!(analytics.std_dev("uri2").unwrap(), 0.0);
    assert_eq!(analytics.normalize("uri2").unwrap(), vec![17.25]);
}

#[test]
fn test_mean_and_std_dev_for_multiple_samples() {
    let analytics = engine();
    let uri1 = [10.1, 9.6, 12.3];
    record_all(&analytics, "uri1", &uri1);
    analytics.record("uri2", 20.0).unwrap();

    let means = analytics.mean_all();
    assert_eq!(means.len(), 2);
    assert_eq!(means["uri1"], uri1.iter().sum::<f64>() / 3.0);
    assert_eq!(means["uri2"], 20.0);

    let std_devs = analytics.std_dev_all();
    assert!((std_devs["uri1"] - sample_std_dev(&uri1)).abs() < 1e-12);
    assert_eq!(std_devs["uri2"], 0.0);
}

#[test]
fn test_repeated_calls_are_identical() {
    let analytics = engine();
    record_all(&analytics, "uri1", &[3.0, 8.5, 4.4, 9.1, 6.6, 2.2, 7.7]);
    record_all(&analytics, "uri2", &[1.0, 1.0]);

    assert_eq!(analytics.mean_all(), analytics.mean_all());
    assert_eq!(analytics.std_dev_all(), analytics.std_dev_all());
    assert_eq!(analytics.normalize_all(), analytics.normalize_all());
    assert_eq!(analytics.histogram_all(), analytics.histogram_all());
}

#[test]
fn test_endpoints_are_isolated() {
    let analytics = engine();
    record_all(&analytics, "uri2", &[5.0, 6.0, 9.0]);
    let before = (
        analytics.mean("uri2").unwrap(),
        analytics.std_dev("uri2").unwrap(),
        analytics.normalize("uri2").unwrap(),
        analytics.histogram("uri2").unwrap(),
    );

    record_all(&analytics, "uri1", &[100.0, 250.0, 1.0, 42.0]);

    let after = (
        analytics.mean("uri2").unwrap(),
        analytics.std_dev("uri2").unwrap(),
        analytics.normalize("uri2").unwrap(),
        analytics.histogram("uri2").unwrap(),
    );
    assert_eq!(before, after);
}

// --- Normalization ---

#[test]
fn test_normalized_values_are_z_scores() {
    let analytics = engine();
    let values = [11.0, 9.5, 13.25, 10.0, 8.75];
    record_all(&analytics, "uri1", &values);

    let mean = values.iter().sum::<f64>() / 5.0;
    let sd = sample_std_dev(&values);
    let z = analytics.normalize("uri1").unwrap();

    assert_eq!(z.len(), 5);
    for (zi, xi) in z.iter().zip(values) {
        assert!((zi - (xi - mean) / sd).abs() < 1e-12);
    }
}

// --- Histogram ---

#[test]
fn test_two_distinct_values_give_two_buckets() {
    let analytics = engine();
    record_all(&analytics, "uri1", &[4.0, 6.0, 4.0, 6.0, 6.0]);

    let h = analytics.histogram("uri1").unwrap();
    assert_eq!(h.mode, BinMode::Exact);
    assert_eq!(h.buckets.len(), 2);
    assert_eq!(h.total(), 5);
}

#[test]
fn test_twelve_distinct_values_give_max_bins_ranges() {
    let analytics = engine();
    let values: Vec<f64> = (0..12).map(|i| 8.0 + (i * i) as f64 * 0.31).collect();
    record_all(&analytics, "uri2", &values);
    analytics.record("uri1", 9.9).unwrap();

    let all = analytics.histogram_all();
    assert_eq!(all.len(), 2);

    let uri2 = &all["uri2"];
    assert_eq!(uri2.mode, BinMode::Range);
    assert_eq!(uri2.buckets.len(), 5);
    assert!(uri2.buckets.iter().all(|b| b.label.contains('~')));
    assert_eq!(uri2.total(), 12);
    // min and max always land in the outer buckets
    assert!(uri2.buckets[0].count > 0);
    assert!(uri2.buckets[4].count > 0);

    // a lone sample is binned under its raw value
    let uri1 = &all["uri1"];
    assert_eq!(uri1.counts(), vec![("9.9", 1)]);
}

#[test]
fn test_histogram_counts_match_sample_counts() {
    let analytics = engine();
    record_all(&analytics, "uri1", &[1.0, 2.0, 2.0, 3.5, 7.25, 7.25, 9.0, 11.0]);
    record_all(&analytics, "uri2", &[15.0, 15.0]);
    record_all(&analytics, "uri3", &[30.0]);

    let samples = analytics.samples();
    for (endpoint, histogram) in analytics.histogram_all() {
        assert_eq!(histogram.total(), samples[&endpoint].len() as u64);
    }
}

#[test]
fn test_changing_max_bins_rebins() {
    let analytics = engine();
    let values: Vec<f64> = (1..=8).map(f64::from).collect();
    record_all(&analytics, "uri1", &values);

    assert_eq!(analytics.histogram("uri1").unwrap().mode, BinMode::Range);
    analytics.set_max_bins(8).unwrap();
    let h = analytics.histogram("uri1").unwrap();
    assert_eq!(h.mode, BinMode::Exact);
    assert_eq!(h.buckets.len(), 8);
}

#[test]
fn test_reset_keeps_bin_config() {
    let analytics = engine();
    analytics.set_max_bins(9).unwrap();
    analytics.record("uri1", 1.0).unwrap();
    analytics.reset();

    assert!(analytics.samples().is_empty());
    assert_eq!(analytics.max_bins(), 9);
}

#[test]
fn test_snapshot_totals() {
    let analytics = engine();
    record_all(&analytics, "uri1", &[1.0, 2.0, 3.0]);
    analytics.record("uri2", 4.0).unwrap();

    let snap = analytics.snapshot();
    assert_eq!(snap.total_samples, 4);
    assert_eq!(snap.max_bins, 5);
    assert_eq!(snap.summaries["uri1"].count, 3);
    assert_eq!(snap.histograms.len(), 2);
}
