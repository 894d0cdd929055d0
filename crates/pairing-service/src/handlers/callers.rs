//! Caller pairing handler.
//!
//! Implements `GET /new_caller?id&type` (also mounted at `/gen_channel`,
//! the older route name kept for client compatibility).

use crate::errors::PairingError;
use crate::matchmaking::PairingOutcome;
use crate::models::{NewCallerParams, NewCallerResponse, Role};
use crate::observability::metrics;
use crate::routes::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Handler for GET /new_caller
///
/// Pairs the caller with the oldest waiting opposite-role caller, or
/// enqueues it with a freshly allocated channel.
///
/// # Response
///
/// - 200 OK: `{ "channelName": ... }`, plus `volunteer_id` and
///   `beneficiary_id` when this request completed a pair
/// - 400 Bad Request: `id` or `type` absent, or `type` not recognized
///
/// The first-arriving member of a pair receives its channel here and then
/// waits; it is never notified when the partner arrives (pull-based
/// contract — the client polls the channel or re-requests).
#[instrument(skip_all, name = "pairing.caller.request", fields(endpoint = "/new_caller"))]
pub async fn new_caller(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NewCallerParams>,
) -> Result<Json<NewCallerResponse>, PairingError> {
    let caller_id = params
        .id
        .filter(|v| !v.is_empty())
        .ok_or_else(|| PairingError::MissingParameter("id".to_string()))?;

    let caller_type = params
        .caller_type
        .filter(|v| !v.is_empty())
        .ok_or_else(|| PairingError::MissingParameter("type".to_string()))?;

    let role = Role::parse(&caller_type).ok_or_else(|| {
        metrics::record_caller_request("unknown", "invalid_type");
        PairingError::InvalidRole(caller_type.clone())
    })?;

    let outcome = state.matchmaker.request_channel(&caller_id, role)?;

    let (volunteers, beneficiaries) = state.matchmaker.queue_depths();
    metrics::update_queue_depth(volunteers, beneficiaries);

    match outcome {
        PairingOutcome::Enqueued { channel } => {
            info!(
                caller_id = %caller_id,
                role = role.as_str(),
                channel = %channel,
                "caller enqueued, waiting for a partner"
            );
            metrics::record_caller_request(role.as_str(), "enqueued");
            Ok(Json(NewCallerResponse {
                channel_name: channel,
                volunteer_id: None,
                beneficiary_id: None,
            }))
        }
        PairingOutcome::Paired {
            channel,
            volunteer_id,
            beneficiary_id,
        } => {
            info!(
                volunteer_id = %volunteer_id,
                beneficiary_id = %beneficiary_id,
                channel = %channel,
                "pair completed"
            );
            metrics::record_caller_request(role.as_str(), "paired");
            Ok(Json(NewCallerResponse {
                channel_name: channel,
                volunteer_id: Some(volunteer_id),
                beneficiary_id: Some(beneficiary_id),
            }))
        }
    }
}
