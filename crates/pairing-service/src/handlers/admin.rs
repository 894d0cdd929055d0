//! Administrative handlers.
//!
//! Implements `GET /flush_queues?cert`, gated by a shared secret.

use crate::errors::PairingError;
use crate::models::{FlushParams, FlushResponse};
use crate::observability::metrics;
use crate::routes::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use ring::constant_time::verify_slices_are_equal;
use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Handler for GET /flush_queues
///
/// Clears both wait queues. The invalidation registry is untouched: a
/// channel invalidated before a flush stays invalid after it.
///
/// # Authorization
///
/// `cert` must equal the configured flush secret; the comparison is
/// constant-time. On mismatch nothing is mutated.
///
/// # Response
///
/// - 200 OK: `{ "flushed": { "volunteers": n, "beneficiaries": m } }`
/// - 400 Bad Request: `cert` absent
/// - 401 Unauthorized: secret mismatch
#[instrument(skip_all, name = "pairing.admin.flush", fields(endpoint = "/flush_queues"))]
pub async fn flush_queues(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FlushParams>,
) -> Result<Json<FlushResponse>, PairingError> {
    let cert = params
        .cert
        .ok_or_else(|| PairingError::MissingParameter("cert".to_string()))?;

    let expected = state.config.flush_secret.expose_secret();
    if verify_slices_are_equal(cert.as_bytes(), expected.as_bytes()).is_err() {
        warn!("flush_queues rejected: administrative secret mismatch");
        return Err(PairingError::Unauthorized);
    }

    let counts = state.matchmaker.flush();
    info!(
        volunteers = counts.volunteers,
        beneficiaries = counts.beneficiaries,
        "wait queues flushed"
    );
    metrics::record_queue_flush(counts.volunteers, counts.beneficiaries);
    metrics::update_queue_depth(0, 0);

    Ok(Json(FlushResponse { flushed: counts }))
}
