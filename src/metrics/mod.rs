// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics,
    REQUESTS_TOTAL,
    REQUEST_DURATION,
    FETCH_OUTCOMES,
    STORE_ENTRIES,
    STAMP_FILES,
};

/// Helper to record request metrics
pub fn record_request(method: &str, endpoint: &str, status_code: u16, duration_secs: f64) {
    REQUESTS_TOTAL
        .with_label_values(&[method, endpoint, &status_code.to_string()])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[endpoint])
        .observe(duration_secs);
}

/// Helper to record how an intercepted fetch was served
pub fn record_fetch_outcome(outcome: &str) {
    FETCH_OUTCOMES.with_label_values(&[outcome]).inc();
}

/// Helper to track the active store's entry count
pub fn update_store_entries(count: usize) {
    STORE_ENTRIES.with_label_values(&["active"]).set(count as f64);
}

/// Helper to record a version stamper file result
pub fn record_stamp_file(result: &str) {
    STAMP_FILES.with_label_values(&[result]).inc();
}
