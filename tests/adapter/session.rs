use serde_json::{Map, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use viking_memory::MemoryBackend;
use viking_memory::memory::ConversationMessage;

use super::viking_server::{adapter, received_bodies};

#[tokio::test]
async fn add_memory_posts_single_user_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/memory/session/add"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "messages": [{"role": "user", "content": "user prefers tabs"}],
            "resource_id": "res-1",
            "metadata": {"default_user_id": "user1", "default_assistant_id": "opencode"}
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"session_id": "abc123"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = adapter(&server)
        .add_memory("user prefers tabs", "user1", None)
        .await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"success": true, "id": "abc123"})
    );

    let bodies = received_bodies(&server).await;
    let metadata = &bodies[0]["metadata"];
    assert!(metadata["time"].as_i64().unwrap() > 0);
    assert!(metadata.get("session_id").is_none());
}

#[tokio::test]
async fn add_memory_does_not_forward_caller_metadata() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/memory/session/add"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .mount(&server)
        .await;

    let mut metadata = Map::new();
    metadata.insert("source".into(), json!("cli"));
    let result = adapter(&server)
        .add_memory("note", "user1", Some(&metadata))
        .await;

    assert!(result.success);
    assert_eq!(result.data.id, "");
    let bodies = received_bodies(&server).await;
    assert!(bodies[0]["metadata"].get("source").is_none());
}

#[tokio::test]
async fn ingest_posts_conversation_under_every_tag() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/memory/session/add"))
        .and(body_partial_json(json!({
            "messages": [
                {"role": "user", "content": "how do I pin a dep?"},
                {"role": "assistant", "content": "use ="}
            ],
            "resource_id": "res-1",
            "metadata": {
                "default_user_id": ["user1", "project1"],
                "default_assistant_id": "opencode",
                "session_id": "conv-7"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"session_id": "s-99", "status": "queued"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let messages = [
        ConversationMessage::new("user", "how do I pin a dep?"),
        ConversationMessage::new("assistant", "use ="),
    ];
    let tags = ["user1".to_string(), "project1".to_string()];
    let result = adapter(&server)
        .ingest_conversation("conv-7", &messages, &tags, None)
        .await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "success": true,
            "id": "s-99",
            "conversationId": "conv-7",
            "status": "queued"
        })
    );
    server.verify().await;
}

#[tokio::test]
async fn ingest_with_single_tag_still_sends_a_list() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/memory/session/add"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .mount(&server)
        .await;

    let tags = ["user1".to_string()];
    let result = adapter(&server)
        .ingest_conversation("c", &[ConversationMessage::new("user", "hi")], &tags, None)
        .await;

    assert!(result.success);
    let bodies = received_bodies(&server).await;
    assert_eq!(bodies[0]["metadata"]["default_user_id"], json!(["user1"]));
    assert_eq!(bodies[0]["metadata"]["session_id"], "c");
}
