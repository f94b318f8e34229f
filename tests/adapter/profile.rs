use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use viking_memory::MemoryBackend;
use viking_memory::memory::ProfileOptions;

use super::viking_server::adapter;

#[tokio::test]
async fn profile_items_land_in_dynamic() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/memory/profile/search"))
        .and(body_json(json!({
            "filter": {"user_id": "user1", "memory_type": "sys_profile_vibe_coding_v1"},
            "query": "editor",
            "resource_id": "res-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"result_list": [
                {"memory_info": "prefers tabs"},
                {"memory_info": {"editor": "helix"}}
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = adapter(&server)
        .get_profile(Some("user1"), Some("editor"), &ProfileOptions::default())
        .await;

    assert!(result.success);
    assert!(result.data.profile.static_items.is_empty());
    assert_eq!(
        result.data.profile.dynamic,
        vec!["prefers tabs", r#"{"editor":"helix"}"#]
    );
}

#[tokio::test]
async fn unscoped_profile_lookup_sends_assistant_filter() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/memory/profile/search"))
        .and(body_json(json!({
            "filter": {"assistant_id": "opencode", "memory_type": "sys_profile_vibe_coding_v1"},
            "query": "state",
            "resource_id": "res-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"result_list": []}})))
        .expect(1)
        .mount(&server)
        .await;

    let options = ProfileOptions {
        memory_type: Some("sys_profile_vibe_coding_v1".into()),
        assistant_id: Some("opencode".into()),
    };
    let result = adapter(&server)
        .get_profile(None, Some("state"), &options)
        .await;

    assert!(result.success);
    assert!(result.data.profile.dynamic.is_empty());
    server.verify().await;
}
