use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use viking_memory::MemoryBackend;
use viking_memory::memory::SearchOptions;

use super::viking_server::adapter;

#[tokio::test]
async fn search_maps_result_list_to_records() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/memory/event/search"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_json(json!({
            "query": "indentation",
            "filter": {"user_id": "user1", "memory_type": "sys_event_vibe_coding_v1"},
            "limit": 5,
            "resource_id": "res-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"count": 1, "result_list": [
                {"id": "m1", "score": 0.9, "memory_info": {"text": "x"}}
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = SearchOptions {
        threshold: Some(0.6),
        limit: Some(5),
        search_mode: Some("hybrid".into()),
    };
    let result = adapter(&server)
        .search_memories("indentation", "user1", &options)
        .await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "success": true,
            "results": [{
                "id": "m1",
                "memory": "{\"text\":\"x\"}",
                "chunk": "{\"text\":\"x\"}",
                "similarity": 0.9
            }],
            "total": 1,
            "timing": 0
        })
    );
    server.verify().await;
}

#[tokio::test]
async fn search_without_limit_omits_it() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/memory/event/search"))
        .and(body_json(json!({
            "query": "q",
            "filter": {"user_id": "user1", "memory_type": "sys_event_vibe_coding_v1"},
            "resource_id": "res-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let result = adapter(&server)
        .search_memories("q", "user1", &SearchOptions::default())
        .await;

    assert!(result.success);
    assert!(result.data.results.is_empty());
    assert_eq!(result.data.total, 0);
}
