//! Test server harness for E2E testing.
//!
//! Provides `TestPairingServer` for spawning real pairing-service
//! instances in tests.

use metrics_exporter_prometheus::PrometheusBuilder;
use pairing_service::config::Config;
use pairing_service::routes::{self, AppState};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Flush secret the harness configures; tests pass this to
/// `/flush_queues?cert=`.
pub const TEST_FLUSH_SECRET: &str = "test-flush-secret";

/// App certificate the harness configures; tests use it to verify issued
/// tokens.
pub const TEST_APP_CERTIFICATE: &str = "test-app-certificate";

/// Test harness for spawning the pairing service in E2E tests.
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_pair_flow() -> Result<(), anyhow::Error> {
///     let server = TestPairingServer::spawn().await?;
///     let client = reqwest::Client::new();
///
///     let response = client
///         .get(format!("{}/new_caller?id=v1&type=volunteer", server.url()))
///         .send()
///         .await?;
///
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestPairingServer {
    addr: SocketAddr,
    config: Config,
    _handle: JoinHandle<()>,
}

impl TestPairingServer {
    /// Spawn a test server with default test configuration.
    ///
    /// The server binds to a random available port (127.0.0.1:0) and runs
    /// the real router in the background with fresh, empty state.
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        Self::spawn_with_vars(HashMap::new()).await
    }

    /// Spawn a test server with configuration variable overrides.
    pub async fn spawn_with_vars(
        overrides: HashMap<String, String>,
    ) -> Result<Self, anyhow::Error> {
        let mut vars = HashMap::from([
            ("BIND_ADDRESS".to_string(), "127.0.0.1:0".to_string()),
            ("APP_ID".to_string(), "test-app".to_string()),
            (
                "APP_CERTIFICATE".to_string(),
                TEST_APP_CERTIFICATE.to_string(),
            ),
            ("FLUSH_SECRET".to_string(), TEST_FLUSH_SECRET.to_string()),
        ]);
        vars.extend(overrides);

        let config = Config::from_vars(&vars)
            .map_err(|e| anyhow::anyhow!("Failed to create config: {e}"))?;

        let state = Arc::new(AppState::new(config.clone()));

        // Build a recorder local to this server rather than installing
        // the process-global one, so parallel tests don't conflict.
        let recorder = PrometheusBuilder::new().build_recorder();
        let metrics_handle = recorder.handle();

        let app = routes::build_routes(state, metrics_handle);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {e}"))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {e}"))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {e}");
            }
        });

        Ok(Self {
            addr,
            config,
            _handle: handle,
        })
    }

    /// Base URL of the running server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// The configuration the server was spawned with.
    pub fn config(&self) -> &Config {
        &self.config
    }
}
