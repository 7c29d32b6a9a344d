//! Metrics collection and exposition.
//!
//! # Metrics
//! - `app_requests_total` (counter): requests by method, route, status
//! - `app_request_duration_seconds` (histogram): latency distribution
//! - `app_in_flight_requests` (gauge): requests currently being served
//! - `app_shutdowns_total` (counter): shutdown outcomes
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus
//! recorder, so tests never need a registry.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within the Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    describe_counter!("app_requests_total", "Total HTTP requests served");
    describe_histogram!(
        "app_request_duration_seconds",
        "HTTP request latency in seconds"
    );
    describe_gauge!("app_in_flight_requests", "Requests currently being served");
    describe_counter!("app_shutdowns_total", "Shutdown sequences by outcome");

    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one served request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    counter!("app_requests_total", &labels).increment(1);
    histogram!("app_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}

pub fn set_in_flight(count: u64) {
    gauge!("app_in_flight_requests").set(count as f64);
}

pub fn record_shutdown(outcome: &'static str) {
    counter!("app_shutdowns_total", "outcome" => outcome).increment(1);
}
