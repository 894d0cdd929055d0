//! HTTP routes for the pairing service.
//!
//! Defines the Axum router and application state.

use crate::config::Config;
use crate::handlers;
use crate::matchmaking::{InvalidationRegistry, Matchmaker};
use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
///
/// The matchmaker exclusively owns both wait queues; the invalidation
/// registry is shared between the matchmaker (allocator collision checks)
/// and the invalidate/validate handlers.
pub struct AppState {
    /// Service configuration.
    pub config: Config,

    /// Wait queues + channel allocator behind one lock.
    pub matchmaker: Matchmaker,

    /// Invalidated channel identifiers.
    pub registry: Arc<InvalidationRegistry>,
}

impl AppState {
    /// Build fresh application state from configuration.
    pub fn new(config: Config) -> Self {
        let registry = Arc::new(InvalidationRegistry::new());
        let matchmaker = Matchmaker::new(config.channel_space, Arc::clone(&registry));
        Self {
            config,
            matchmaker,
            registry,
        }
    }
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `GET /access_token` - Issue a channel access token (stateless)
/// - `GET /new_caller` - Pair or enqueue a caller
/// - `GET /gen_channel` - Older name for `/new_caller`, kept for clients
/// - `GET /invalidate_channel` - Mark a channel unusable
/// - `GET /validate_channel` - Query channel validity
/// - `GET /flush_queues` - Administrative queue flush (secret-gated)
/// - `GET /health` - Liveness probe (plain "OK")
/// - `GET /metrics` - Prometheus metrics endpoint
/// - TraceLayer for request logging
/// - 30 second request timeout
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let api_routes = Router::new()
        .route("/access_token", get(handlers::access_token))
        .route("/new_caller", get(handlers::new_caller))
        .route("/gen_channel", get(handlers::new_caller))
        .route("/invalidate_channel", get(handlers::invalidate_channel))
        .route("/validate_channel", get(handlers::validate_channel))
        .route("/flush_queues", get(handlers::flush_queues))
        .route("/health", get(handlers::health_check))
        .with_state(state);

    // Metrics route with its own state
    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    api_routes
        .merge(metrics_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}
