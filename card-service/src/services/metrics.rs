//! Prometheus export plus the domain counters recorded by the dispatcher.

use crate::domain::ScoreBand;
use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the global Prometheus recorder. Later calls are no-ops, so tests
/// can call this freely.
pub fn init_metrics() {
    METRICS_HANDLE.get_or_init(|| {
        PrometheusBuilder::new()
            .install_recorder()
            .expect("failed to install Prometheus recorder")
    });
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

pub fn record_application_created(band: ScoreBand) {
    counter!("credit_applications_created_total", "band" => band.as_str()).increment(1);
}

pub fn record_application_deleted(deleted: u64) {
    counter!("credit_applications_deleted_total").increment(deleted);
}
