//! Channel access token handler.
//!
//! Implements `GET /access_token?channelName&uid&role&expireTime`.
//!
//! Token issuance is stateless: the response is a pure function of the
//! query parameters and the configured signing secret. Responses carry
//! no-cache headers so every request reaches the service and gets a
//! freshly minted token.

use crate::errors::PairingError;
use crate::models::{AccessTokenParams, TokenResponse};
use crate::observability::metrics;
use crate::routes::AppState;
use crate::services::token_service::{self, TokenRole};
use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::instrument;

/// Handler for GET /access_token
///
/// # Response
///
/// - 200 OK: `{ "token": ... }`
/// - 400 Bad Request: `channelName` absent or empty
///
/// Defaults when parameters are absent or empty: `uid` "0", role
/// subscriber, `expireTime` the configured TTL. An unparseable
/// `expireTime` also falls back to the configured TTL.
#[instrument(skip_all, name = "pairing.token.issue", fields(endpoint = "/access_token"))]
pub async fn access_token(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AccessTokenParams>,
) -> Result<impl IntoResponse, PairingError> {
    let channel = params
        .channel_name
        .filter(|c| !c.is_empty())
        .ok_or_else(|| {
            metrics::record_token_issued("error");
            PairingError::MissingParameter("channelName".to_string())
        })?;

    let uid = params
        .uid
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| "0".to_string());

    let role = TokenRole::from_query(params.role.as_deref());

    let ttl_seconds = params
        .expire_time
        .filter(|t| !t.is_empty())
        .and_then(|t| t.parse().ok())
        .unwrap_or(state.config.default_token_ttl_seconds);

    let token = token_service::issue_channel_token(
        &state.config.app_id,
        state.config.app_certificate.expose_secret(),
        &channel,
        &uid,
        role,
        ttl_seconds,
    )
    .inspect_err(|_| metrics::record_token_issued("error"))?;

    metrics::record_token_issued("success");

    Ok((
        [
            (
                header::CACHE_CONTROL,
                "private, no-cache, no-store, must-revalidate",
            ),
            (header::EXPIRES, "-1"),
            (header::PRAGMA, "no-cache"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        Json(TokenResponse { token }),
    ))
}
