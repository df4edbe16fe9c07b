//! Prometheus metrics for the polling loop.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use tracing::debug;

// === Metric Name Constants ===

/// Snapshot fetch latency metric name.
pub const METRIC_SNAPSHOT_FETCH_LATENCY: &str = "snapshot_fetch_latency_ms";
/// Completed polling cycles counter metric name.
pub const METRIC_CYCLES_COMPLETED: &str = "cycles_completed_total";
/// Snapshot fetch failures counter metric name.
pub const METRIC_FETCH_FAILURES: &str = "snapshot_fetch_failures_total";
/// Markets retained in the batch gauge metric name.
pub const METRIC_MARKETS_FLAGGED: &str = "markets_flagged";
/// Audible alerts fired counter metric name.
pub const METRIC_ALERTS_FIRED: &str = "alerts_fired_total";
/// Markets skipped on evaluation errors counter metric name.
pub const METRIC_MARKETS_SKIPPED: &str = "markets_skipped_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_SNAPSHOT_FETCH_LATENCY,
        "Snapshot fetch latency in milliseconds"
    );
    describe_counter!(METRIC_CYCLES_COMPLETED, "Total number of completed polling cycles");
    describe_gauge!(METRIC_MARKETS_FLAGGED, "Markets retained in the last cycle's batch");
    describe_counter!(METRIC_FETCH_FAILURES, "Total number of snapshot fetch failures");
    describe_counter!(METRIC_ALERTS_FIRED, "Total number of audible alerts fired");
    describe_counter!(
        METRIC_MARKETS_SKIPPED,
        "Total number of markets skipped on evaluation errors"
    );

    debug!("Metrics initialized");
}

/// Record snapshot fetch latency.
pub fn record_fetch_latency(start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_SNAPSHOT_FETCH_LATENCY).record(latency_ms);
}

/// Record how many markets the last cycle retained.
pub fn record_markets_flagged(count: usize) {
    gauge!(METRIC_MARKETS_FLAGGED).set(count as f64);
}

/// Increment completed cycles counter.
pub fn inc_cycles_completed() {
    counter!(METRIC_CYCLES_COMPLETED).increment(1);
}

/// Increment fetch failures counter.
pub fn inc_fetch_failures() {
    counter!(METRIC_FETCH_FAILURES).increment(1);
}

/// Increment alerts fired counter.
pub fn inc_alerts_fired() {
    counter!(METRIC_ALERTS_FIRED).increment(1);
}

/// Increment skipped markets counter.
pub fn inc_markets_skipped() {
    counter!(METRIC_MARKETS_SKIPPED).increment(1);
}
