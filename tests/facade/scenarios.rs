use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::viking_server::client;

#[tokio::test]
async fn search_sends_configured_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/memory/event/search"))
        .and(body_partial_json(json!({"query": "tabs", "limit": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"count": 1, "result_list": [
                {"id": "m1", "score": 0.9, "memory_info": {"text": "x"}}
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server).search_memories("tabs", "user1").await;

    assert!(result.success);
    assert_eq!(result.data.results[0].content(), r#"{"text":"x"}"#);
    assert_eq!(result.data.results[0].similarity, Some(0.9));
    server.verify().await;
}

#[tokio::test]
async fn add_then_list_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/memory/session/add"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"session_id": "abc123"}})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/memory/event/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"count": 2, "result_list": [
                {"id": "a", "time": 1_000, "memory_info": "older"},
                {"id": "b", "time": 2_000, "memory_info": "newer"}
            ]}
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let added = client.add_memory("user prefers tabs", "user1", None).await;
    assert_eq!(added.data.id, "abc123");

    let listed = client.list_memories("user1", 1).await;
    assert!(listed.success);
    let ids: Vec<&str> = listed.data.memories.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["b", "a"]);
    assert_eq!(listed.data.pagination.total_pages, 2);
}
