//! Channel invalidation and validation handlers.
//!
//! Implements `GET /invalidate_channel?channel` and
//! `GET /validate_channel?channel`.

use crate::errors::PairingError;
use crate::models::{ChannelParams, InvalidateResponse, ValidateResponse};
use crate::observability::metrics;
use crate::routes::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Handler for GET /invalidate_channel
///
/// Marks the channel permanently unusable. Idempotent: invalidating an
/// already-invalid channel succeeds.
///
/// # Response
///
/// - 200 OK: `{ "invalidated": true }`
/// - 400 Bad Request: `channel` absent or empty
#[instrument(skip_all, name = "pairing.channel.invalidate", fields(endpoint = "/invalidate_channel"))]
pub async fn invalidate_channel(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChannelParams>,
) -> Result<Json<InvalidateResponse>, PairingError> {
    let channel = params
        .channel
        .filter(|c| !c.is_empty())
        .ok_or_else(|| PairingError::MissingParameter("channel".to_string()))?;

    state.registry.invalidate(&channel);
    info!(channel = %channel, "channel invalidated");
    metrics::record_channel_invalidated(state.registry.len());

    Ok(Json(InvalidateResponse { invalidated: true }))
}

/// Handler for GET /validate_channel
///
/// # Response
///
/// - 200 OK: `{ "is_valid": bool }` — false iff the channel has been
///   invalidated
/// - 400 Bad Request: `channel` absent or empty
#[instrument(skip_all, name = "pairing.channel.validate", fields(endpoint = "/validate_channel"))]
pub async fn validate_channel(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChannelParams>,
) -> Result<Json<ValidateResponse>, PairingError> {
    let channel = params
        .channel
        .filter(|c| !c.is_empty())
        .ok_or_else(|| PairingError::MissingParameter("channel".to_string()))?;

    Ok(Json(ValidateResponse {
        is_valid: state.registry.is_valid(&channel),
    }))
}
