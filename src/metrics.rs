//! Prometheus metrics for order traffic.
//!
//! Counters for each kind of mutation and failure, plus a latency histogram
//! labelled by operation.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Request latency metric name.
pub const METRIC_REQUEST_LATENCY: &str = "order_request_latency_ms";
/// Orders created counter metric name.
pub const METRIC_ORDERS_CREATED: &str = "orders_created_total";
/// Orders updated counter metric name.
pub const METRIC_ORDERS_UPDATED: &str = "orders_updated_total";
/// Orders deleted counter metric name.
pub const METRIC_ORDERS_DELETED: &str = "orders_deleted_total";
/// Lookups of absent ids counter metric name.
pub const METRIC_LOOKUPS_MISSED: &str = "order_lookups_missed_total";
/// Failed requests counter metric name.
pub const METRIC_REQUESTS_FAILED: &str = "order_requests_failed_total";

/// Install the Prometheus recorder and register metric descriptions.
///
/// Call once at startup. The handle renders the exposition text for `/metrics`.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Register metric descriptions with the installed recorder.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_REQUEST_LATENCY,
        "Order request handling latency in milliseconds"
    );

    describe_counter!(METRIC_ORDERS_CREATED, "Total number of orders created");
    describe_counter!(METRIC_ORDERS_UPDATED, "Total number of order status updates");
    describe_counter!(METRIC_ORDERS_DELETED, "Total number of orders deleted");
    describe_counter!(
        METRIC_LOOKUPS_MISSED,
        "Total number of requests referencing an absent order id"
    );
    describe_counter!(
        METRIC_REQUESTS_FAILED,
        "Total number of requests that failed unexpectedly"
    );

    debug!("Metrics initialized");
}

/// Record request latency for an operation.
pub fn record_request_latency(start: Instant, operation: &'static str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_REQUEST_LATENCY, "operation" => operation).record(latency_ms);
}

/// Increment orders created counter.
pub fn inc_orders_created() {
    counter!(METRIC_ORDERS_CREATED).increment(1);
}

/// Increment orders updated counter.
pub fn inc_orders_updated() {
    counter!(METRIC_ORDERS_UPDATED).increment(1);
}

/// Increment orders deleted counter.
pub fn inc_orders_deleted() {
    counter!(METRIC_ORDERS_DELETED).increment(1);
}

/// Increment missed lookups counter.
pub fn inc_lookups_missed() {
    counter!(METRIC_LOOKUPS_MISSED).increment(1);
}

/// Increment failed requests counter.
pub fn inc_requests_failed(operation: &'static str) {
    counter!(METRIC_REQUESTS_FAILED, "operation" => operation).increment(1);
}
