//! Health check handler.

/// Liveness probe handler.
///
/// Returns a simple "OK" response to indicate the process is running.
/// There are no external dependencies to check: all state is in-memory,
/// so a readiness probe would be identical.
pub async fn health_check() -> &'static str {
    "OK"
}
