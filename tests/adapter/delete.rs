use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use viking_memory::MemoryBackend;

use super::viking_server::adapter;

#[tokio::test]
async fn delete_sends_memory_id_and_ignores_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/memory/event/delete"))
        .and(body_json(json!({"memory_id": "m1", "resource_id": "res-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .expect(1)
        .mount(&server)
        .await;

    let result = adapter(&server).delete_memory("m1").await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"success": true})
    );
    server.verify().await;
}
