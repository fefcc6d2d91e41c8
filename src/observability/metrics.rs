//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_selections_total` (counter): successful picks by pool
//! - `router_selection_failures_total` (counter): picks with no routable node
//! - `router_probes_sent_total` (counter): admin probes published
//! - `router_probe_publish_failures_total` (counter): probes the bus refused
//! - `router_evictions_total` (counter): nodes evicted by the failure detector
//! - `router_evidence_rejected_total` (counter): dropped inbound messages by reason
//! - `router_routable_nodes` (gauge): nodes currently enabled and online
//!
//! Without an installed recorder every call is a no-op.

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_selection(pool: &'static str) {
    counter!("router_selections_total", "pool" => pool).increment(1);
}

pub fn record_selection_failure() {
    counter!("router_selection_failures_total").increment(1);
}

pub fn record_probe_sent() {
    counter!("router_probes_sent_total").increment(1);
}

pub fn record_probe_publish_failure() {
    counter!("router_probe_publish_failures_total").increment(1);
}

pub fn record_eviction(node: &str) {
    counter!("router_evictions_total", "node" => node.to_string()).increment(1);
}

pub fn record_evidence_rejected(reason: &'static str) {
    counter!("router_evidence_rejected_total", "reason" => reason).increment(1);
}

pub fn record_routable_nodes(count: usize) {
    gauge!("router_routable_nodes").set(count as f64);
}
