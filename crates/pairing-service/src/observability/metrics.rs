//! Metrics definitions for the pairing service.
//!
//! All metrics follow Prometheus naming conventions:
//! - `pairing_` prefix
//! - `_total` suffix for counters
//!
//! Label cardinality is bounded: `role` has 3 values (volunteer,
//! beneficiary, unknown), `outcome` 3 (enqueued, paired, invalid_type),
//! `result` 2 (success, error).

use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics recorder and return the handle for
/// serving metrics via HTTP.
///
/// Must be called before any metrics are recorded.
///
/// # Errors
///
/// Returns error if the recorder fails to install (e.g., already installed).
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus metrics recorder: {e}"))
}

/// Record a `/new_caller` request and its outcome.
pub fn record_caller_request(role: &str, outcome: &str) {
    counter!("pairing_caller_requests_total",
        "role" => role.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Update the per-role wait queue depth gauges.
pub fn update_queue_depth(volunteers: usize, beneficiaries: usize) {
    gauge!("pairing_queue_depth", "role" => "volunteer").set(volunteers as f64);
    gauge!("pairing_queue_depth", "role" => "beneficiary").set(beneficiaries as f64);
}

/// Record a channel invalidation and the registry's current size.
///
/// The registry grows monotonically; the gauge makes that growth visible
/// so operators can see when a restart is warranted.
pub fn record_channel_invalidated(registry_size: usize) {
    counter!("pairing_channels_invalidated_total").increment(1);
    gauge!("pairing_invalidation_registry_size").set(registry_size as f64);
}

/// Record a token issuance attempt.
pub fn record_token_issued(result: &'static str) {
    counter!("pairing_tokens_issued_total", "result" => result).increment(1);
}

/// Record an administrative queue flush.
pub fn record_queue_flush(volunteers: usize, beneficiaries: usize) {
    counter!("pairing_queue_flushes_total").increment(1);
    counter!("pairing_flushed_callers_total", "role" => "volunteer")
        .increment(volunteers as u64);
    counter!("pairing_flushed_callers_total", "role" => "beneficiary")
        .increment(beneficiaries as u64);
}
