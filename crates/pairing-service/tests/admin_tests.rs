//! Administrative flush integration tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use pairing_test_utils::server_harness::TEST_FLUSH_SECRET;
use pairing_test_utils::TestPairingServer;
use serde_json::Value;

/// Flush with the correct secret empties both queues; subsequent callers
/// behave as if the service were freshly started.
#[tokio::test]
async fn test_flush_with_correct_secret_empties_queues() -> Result<(), anyhow::Error> {
    let server = TestPairingServer::spawn().await?;
    let client = reqwest::Client::new();

    for id in ["v1", "v2"] {
        client
            .get(format!(
                "{}/new_caller?id={id}&type=volunteer",
                server.url()
            ))
            .send()
            .await?;
    }

    let response = client
        .get(format!(
            "{}/flush_queues?cert={TEST_FLUSH_SECRET}",
            server.url()
        ))
        .send()
        .await?;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body["flushed"]["volunteers"].as_u64(), Some(2));
    assert_eq!(body["flushed"]["beneficiaries"].as_u64(), Some(0));

    // Freshly started behavior: a beneficiary now enqueues instead of
    // pairing with a flushed volunteer.
    let response = client
        .get(format!(
            "{}/new_caller?id=b1&type=beneficiary",
            server.url()
        ))
        .send()
        .await?;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    assert!(body.get("volunteer_id").is_none());

    Ok(())
}

/// Flush with a wrong secret returns 401 and leaves queue state intact.
#[tokio::test]
async fn test_flush_with_wrong_secret_is_rejected() -> Result<(), anyhow::Error> {
    let server = TestPairingServer::spawn().await?;
    let client = reqwest::Client::new();

    let response = client
        .get(format!(
            "{}/new_caller?id=v1&type=volunteer",
            server.url()
        ))
        .send()
        .await?;
    let waiting: Value = response.json().await?;

    let response = client
        .get(format!("{}/flush_queues?cert=wrong-secret", server.url()))
        .send()
        .await?;
    assert_eq!(response.status(), 401);
    let body: Value = response.json().await?;
    assert_eq!(body["error"]["code"].as_str(), Some("UNAUTHORIZED"));

    // v1 is still waiting: the next beneficiary pairs with it.
    let response = client
        .get(format!(
            "{}/new_caller?id=b1&type=beneficiary",
            server.url()
        ))
        .send()
        .await?;
    let paired: Value = response.json().await?;
    assert_eq!(paired["volunteer_id"].as_str(), Some("v1"));
    assert_eq!(paired["channelName"], waiting["channelName"]);

    Ok(())
}

/// Missing `cert` parameter yields 400.
#[tokio::test]
async fn test_flush_without_cert_is_rejected() -> Result<(), anyhow::Error> {
    let server = TestPairingServer::spawn().await?;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/flush_queues", server.url()))
        .send()
        .await?;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await?;
    assert_eq!(body["error"]["code"].as_str(), Some("MISSING_PARAMETER"));

    Ok(())
}

/// Flushing empty queues succeeds with zero counts.
#[tokio::test]
async fn test_flush_empty_queues() -> Result<(), anyhow::Error> {
    let server = TestPairingServer::spawn().await?;
    let client = reqwest::Client::new();

    let response = client
        .get(format!(
            "{}/flush_queues?cert={TEST_FLUSH_SECRET}",
            server.url()
        ))
        .send()
        .await?;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body["flushed"]["volunteers"].as_u64(), Some(0));
    assert_eq!(body["flushed"]["beneficiaries"].as_u64(), Some(0));

    Ok(())
}
