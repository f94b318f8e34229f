use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::viking_server::client;

#[tokio::test]
async fn profile_items_become_experience_cards() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/memory/profile/search"))
        .and(body_json(json!({
            "filter": {"assistant_id": "opencode", "memory_type": "sys_profile_vibe_coding_v1"},
            "query": "state management",
            "resource_id": "res-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"result_list": [
                {"memory_info": "prefers zustand"},
                {"memory_info": {"testing": "vitest"}}
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server)
        .search_experience_cards("state management")
        .await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "success": true,
            "results": [
                {
                    "id": "experience_card_0",
                    "memory": "prefers zustand",
                    "chunk": "prefers zustand",
                    "similarity": 1.0
                },
                {
                    "id": "experience_card_1",
                    "memory": "{\"testing\":\"vitest\"}",
                    "chunk": "{\"testing\":\"vitest\"}",
                    "similarity": 1.0
                }
            ],
            "total": 2,
            "timing": 0
        })
    );
    server.verify().await;
}

#[tokio::test]
async fn failed_profile_lookup_fails_the_card_search() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let result = client(&server).search_experience_cards("anything").await;

    assert!(!result.success);
    assert_eq!(result.error(), Some("HTTP 502: bad gateway"));
    assert!(result.data.results.is_empty());
    assert_eq!(result.data.total, 0);
}
