//! Metrics collection and exposition.
//!
//! # Metrics
//! - `warden_gate_decisions_total` (counter): gate outcomes by route, outcome
//! - `warden_engine_rebuilds_total` (counter): engine rebuilds by trigger
//! - `warden_preview_requests_total` (counter): admin preview calls

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Start the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter started"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics exporter"),
    }
}

pub fn record_gate_decision(route: &str, denied: bool) {
    let outcome = if denied { "denied" } else { "allowed" };
    metrics::counter!(
        "warden_gate_decisions_total",
        "route" => route.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_engine_rebuild(trigger: &'static str) {
    metrics::counter!("warden_engine_rebuilds_total", "trigger" => trigger).increment(1);
}

pub fn record_preview() {
    metrics::counter!("warden_preview_requests_total").increment(1);
}
