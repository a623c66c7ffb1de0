//! Client metrics

use prometheus::{register_counter_vec, register_histogram_vec, CounterVec, HistogramVec};

lazy_static::lazy_static! {
    /// Requests by route and outcome
    pub static ref CLIENT_REQUESTS_TOTAL: CounterVec = register_counter_vec!(
        "compliance_client_requests_total",
        "Total compliance API requests",
        &["endpoint", "outcome"]
    )
    .unwrap();

    /// Request latency by route
    pub static ref CLIENT_REQUEST_DURATION: HistogramVec = register_histogram_vec!(
        "compliance_client_request_duration_seconds",
        "Compliance API request duration",
        &["endpoint"]
    )
    .unwrap();
}

/// Record one finished round trip
pub fn record_request(endpoint: &str, success: bool, elapsed_secs: f64) {
    let outcome = if success { "success" } else { "failure" };
    CLIENT_REQUESTS_TOTAL
        .with_label_values(&[endpoint, outcome])
        .inc();
    CLIENT_REQUEST_DURATION
        .with_label_values(&[endpoint])
        .observe(elapsed_secs);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_request_counts_by_outcome() {
        let before_ok = CLIENT_REQUESTS_TOTAL
            .with_label_values(&["metrics-test", "success"])
            .get();
        let before_err = CLIENT_REQUESTS_TOTAL
            .with_label_values(&["metrics-test", "failure"])
            .get();

        record_request("metrics-test", true, 0.01);
        record_request("metrics-test", false, 0.02);
        record_request("metrics-test", false, 0.03);

        assert_eq!(
            CLIENT_REQUESTS_TOTAL
                .with_label_values(&["metrics-test", "success"])
                .get(),
            before_ok + 1.0
        );
        assert_eq!(
            CLIENT_REQUESTS_TOTAL
                .with_label_values(&["metrics-test", "failure"])
                .get(),
            before_err + 2.0
        );
        assert_eq!(
            CLIENT_REQUEST_DURATION
                .with_label_values(&["metrics-test"])
                .get_sample_count(),
            3
        );
    }
}
