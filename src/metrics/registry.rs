// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use lazy_static::lazy_static;
use prometheus::{
    CounterVec, GaugeVec, HistogramVec, Opts, Registry, TextEncoder, Encoder,
    register_counter_vec_with_registry, register_histogram_vec_with_registry,
    register_gauge_vec_with_registry,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // REQUEST METRICS
    // ============================================================================

    /// Total number of gateway requests
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("requests_total", "Total number of gateway requests"),
        &["method", "endpoint", "status_code"],
        REGISTRY
    ).unwrap();

    /// Request duration histogram
    pub static ref REQUEST_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("request_duration_seconds", "Request duration in seconds")
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["endpoint"],
        REGISTRY
    ).unwrap();

    // ============================================================================
    // FETCH POLICY METRICS
    // ============================================================================

    /// Intercepted fetches by how they were served
    pub static ref FETCH_OUTCOMES: CounterVec = register_counter_vec_with_registry!(
        Opts::new("fetch_outcomes_total", "Intercepted fetches by outcome"),
        &["outcome"], // outcome: hit, miss, bypass
        REGISTRY
    ).unwrap();

    // ============================================================================
    // CACHE STORE METRICS
    // ============================================================================

    /// Current cache store entries
    pub static ref STORE_ENTRIES: GaugeVec = register_gauge_vec_with_registry!(
        Opts::new("store_entries_current", "Current number of cache store entries"),
        &["type"], // type: active
        REGISTRY
    ).unwrap();

    // ============================================================================
    // STAMPER METRICS
    // ============================================================================

    /// Version stamper file results
    pub static ref STAMP_FILES: CounterVec = register_counter_vec_with_registry!(
        Opts::new("stamp_files_total", "Version stamper file results"),
        &["result"], // result: updated, missing
        REGISTRY
    ).unwrap();
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}
