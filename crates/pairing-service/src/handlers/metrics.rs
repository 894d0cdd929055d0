//! Prometheus metrics endpoint handler.
//!
//! Unauthenticated so Prometheus can scrape; metrics carry only
//! operational data with bounded-cardinality labels, never caller ids or
//! channel identifiers.

use axum::{extract::State, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;

/// Handler for GET /metrics
///
/// Returns Prometheus-formatted metrics for scraping.
#[tracing::instrument(skip_all, name = "pairing.metrics.scrape")]
pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    handle.render()
}
