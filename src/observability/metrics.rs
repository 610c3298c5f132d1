//! Transaction counters.
//!
//! # Metrics
//! - `multimint_tx_attempts_total` (counter): attempts started, by stage
//! - `multimint_tx_failures_total` (counter): failed attempts, by stage and reason
//! - `multimint_tx_confirmed_total` (counter): successful receipts, by stage

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Start the Prometheus scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

pub fn record_attempt(stage: &'static str) {
    counter!("multimint_tx_attempts_total", "stage" => stage).increment(1);
}

pub fn record_attempt_failure(stage: &'static str, reason: &'static str) {
    counter!("multimint_tx_failures_total", "stage" => stage, "reason" => reason).increment(1);
}

pub fn record_confirmed(stage: &'static str) {
    counter!("multimint_tx_confirmed_total", "stage" => stage).increment(1);
}
