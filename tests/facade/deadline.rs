use std::time::{Duration, Instant};

use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use viking_memory::{ClientSettings, VikingMemoryClient};

use super::viking_server::{adapter, client};

#[tokio::test]
async fn slow_backend_is_cut_off_at_deadline() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"session_id": "late"}}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = client(&server).with_timeout(Duration::from_millis(200));
    let started = Instant::now();
    let result = client.add_memory("x", "user1", None).await;

    assert!(started.elapsed() < Duration::from_secs(4));
    assert!(!result.success);
    assert_eq!(result.error(), Some("Timeout after 200ms"));
    assert_eq!(result.data.id, "");
}

#[tokio::test]
async fn fast_backend_beats_deadline() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"count": 0, "result_list": []}}))
                .set_delay(Duration::from_millis(20)),
        )
        .mount(&server)
        .await;

    let client = client(&server).with_timeout(Duration::from_secs(5));
    let result = client.search_memories("q", "user1").await;

    assert!(result.success);
    assert_eq!(result.data.total, 0);
}

#[tokio::test]
async fn adapter_sets_no_request_limit_under_the_deadline() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"session_id": "slow-but-fine"}}))
                .set_delay(Duration::from_millis(1_500)),
        )
        .mount(&server)
        .await;

    assert_eq!(adapter(&server).transport_timeout(), None);
    let client = client(&server).with_timeout(Duration::from_secs(10));
    let result = client.add_memory("x", "user1", None).await;

    assert!(result.success, "{:?}", result.error());
    assert_eq!(result.data.id, "slow-but-fine");
}

#[tokio::test]
async fn explicit_transport_limit_surfaces_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {}}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let backend = adapter(&server).with_transport_timeout(Duration::from_millis(100));
    let client = VikingMemoryClient::new(std::sync::Arc::new(backend), ClientSettings::default())
        .with_timeout(Duration::from_secs(3));
    let result = client.delete_memory("m1").await;

    assert!(!result.success);
    let error = result.error().unwrap();
    assert!(!error.starts_with("Timeout after"), "{error}");
}
