//! Transport adapter for the Viking memory service.
//!
//! [`VikingMemory`] turns each memory capability into exactly one `POST`
//! against the service and decodes exactly one response shape (see
//! [`wire`]). It never fails past its boundary: HTTP errors, network errors
//! and undecodable bodies become a failed [`OperationResult`].

pub mod scrub;
pub mod wire;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::config::{Credentials, VikingConfig};
use crate::error::{ConfigError, MemoryError};
use crate::memory::{
    AddMemory, ConversationMessage, DeleteMemory, GetProfile, IngestConversation, ListMemories,
    ListOptions, MemoryBackend, Metadata, OperationResult, ProfileOptions, SearchMemories,
    SearchOptions,
};
use wire::{
    DEFAULT_ASSISTANT_ID, DELETE_PATH, DeleteRequest, EVENT_MEMORY_TYPE, LIST_PAGE_SIZE,
    MemoryFilter, PROFILE_MEMORY_TYPE, PROFILE_PATH, ProfileRequest, SEARCH_PATH,
    SESSION_ADD_PATH, SearchRequest, SessionAddRequest, SessionMetadata, SessionOwner,
};

const DEBUG_HEADER: &str = "X-Viking-Debug";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

fn build_http_client() -> Client {
    Client::builder()
        .user_agent(concat!("viking-memory/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default HTTP client");
            Client::new()
        })
}

/// Requests carry no overall time limit of their own unless
/// [`VikingMemory::with_transport_timeout`] sets one; the facade's deadline
/// bounds them. Only connecting is capped here.
pub struct VikingMemory {
    client: Client,
    credentials: Credentials,
    debug: bool,
    transport_timeout: Option<Duration>,
}

impl VikingMemory {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            client: build_http_client(),
            credentials,
            debug: false,
            transport_timeout: None,
        }
    }

    /// Build from resolved configuration; fails when a credential is
    /// missing or the base URL is unusable.
    pub fn from_config(config: &VikingConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.credentials()?).with_debug(config.debug))
    }

    /// Send `X-Viking-Debug: 1` with every request.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Per-request limit for adapters used without the facade.
    pub fn with_transport_timeout(mut self, timeout: Duration) -> Self {
        self.transport_timeout = Some(timeout);
        self
    }

    pub fn transport_timeout(&self) -> Option<Duration> {
        self.transport_timeout
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.credentials.base_url
    }

    pub fn resource_id(&self) -> &str {
        &self.credentials.resource_id
    }

    /// POST `body` as JSON and return the raw response text of a 2xx reply.
    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, MemoryError> {
        let url = format!("{}{path}", self.credentials.base_url);
        tracing::debug!(%url, "viking request");

        let mut request = self
            .client
            .post(&url)
            .bearer_auth(&self.credentials.api_key)
            .json(body);
        if self.debug {
            request = request.header(DEBUG_HEADER, "1");
        }
        if let Some(timeout) = self.transport_timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read error body>".to_string());
            return Err(MemoryError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, MemoryError> {
        let text = self.post(path, body).await?;
        let value: Value = serde_json::from_str(&text)?;
        tracing::debug!(
            path,
            response = %scrub::loggable(&text, &self.credentials.api_key),
            "viking response"
        );
        Ok(value)
    }

    fn finish<T: Default>(
        &self,
        operation: &'static str,
        result: Result<T, MemoryError>,
    ) -> OperationResult<T> {
        if let Err(e) = &result {
            tracing::warn!(
                operation,
                error = %scrub::loggable(&e.to_string(), &self.credentials.api_key),
                "viking call failed"
            );
        }
        result.into()
    }

    async fn try_search(
        &self,
        query: &str,
        container_tag: &str,
        options: &SearchOptions,
    ) -> Result<SearchMemories, MemoryError> {
        tracing::debug!(
            container_tag,
            limit = ?options.limit,
            threshold = ?options.threshold,
            search_mode = ?options.search_mode,
            "search_memories"
        );
        let request = SearchRequest {
            query: Some(query),
            filter: MemoryFilter {
                user_id: Some(container_tag),
                assistant_id: None,
                memory_type: EVENT_MEMORY_TYPE,
            },
            limit: options.limit,
            resource_id: &self.credentials.resource_id,
        };
        let body = self.post_json(SEARCH_PATH, &request).await?;
        Ok(wire::decode_search(&body))
    }

    async fn try_get_profile(
        &self,
        container_tag: Option<&str>,
        query: Option<&str>,
        options: &ProfileOptions,
    ) -> Result<GetProfile, MemoryError> {
        let request = ProfileRequest {
            filter: MemoryFilter {
                user_id: container_tag,
                assistant_id: options.assistant_id.as_deref(),
                memory_type: options.memory_type.as_deref().unwrap_or(PROFILE_MEMORY_TYPE),
            },
            query,
            resource_id: &self.credentials.resource_id,
        };
        let body = self.post_json(PROFILE_PATH, &request).await?;
        Ok(GetProfile {
            profile: wire::decode_profile(&body),
        })
    }

    async fn try_add(
        &self,
        content: &str,
        container_tag: &str,
        metadata: Option<&Metadata>,
    ) -> Result<AddMemory, MemoryError> {
        if let Some(metadata) = metadata {
            tracing::debug!(
                keys = ?metadata.keys().collect::<Vec<_>>(),
                "add_memory metadata not forwarded"
            );
        }
        let messages = [ConversationMessage::new("user", content)];
        let request = SessionAddRequest {
            messages: &messages,
            resource_id: &self.credentials.resource_id,
            metadata: SessionMetadata {
                default_user_id: SessionOwner::One(container_tag),
                default_assistant_id: DEFAULT_ASSISTANT_ID,
                time: chrono::Utc::now().timestamp_millis(),
                session_id: None,
            },
        };
        let body = self.post_json(SESSION_ADD_PATH, &request).await?;
        Ok(AddMemory {
            id: wire::decode_session_id(&body),
        })
    }

    async fn try_delete(&self, memory_id: &str) -> Result<DeleteMemory, MemoryError> {
        let request = DeleteRequest {
            memory_id,
            resource_id: &self.credentials.resource_id,
        };
        self.post(DELETE_PATH, &request).await?;
        Ok(DeleteMemory {})
    }

    async fn try_list(
        &self,
        container_tag: &str,
        limit: usize,
        options: &ListOptions,
    ) -> Result<ListMemories, MemoryError> {
        let request = SearchRequest {
            query: None,
            filter: MemoryFilter {
                user_id: Some(container_tag),
                assistant_id: None,
                memory_type: EVENT_MEMORY_TYPE,
            },
            limit: Some(LIST_PAGE_SIZE),
            resource_id: &self.credentials.resource_id,
        };
        let body = self.post_json(SEARCH_PATH, &request).await?;
        let mut listed = wire::decode_list(&body, limit);
        wire::apply_list_order(&mut listed.memories, options);
        Ok(listed)
    }

    async fn try_ingest(
        &self,
        conversation_id: &str,
        messages: &[ConversationMessage],
        container_tags: &[String],
        metadata: Option<&Metadata>,
    ) -> Result<IngestConversation, MemoryError> {
        if container_tags.is_empty() {
            return Err(MemoryError::InvalidArgument(
                "ingest_conversation requires at least one container tag".into(),
            ));
        }
        if let Some(metadata) = metadata {
            tracing::debug!(
                keys = ?metadata.keys().collect::<Vec<_>>(),
                "ingest metadata not forwarded"
            );
        }

        let request = SessionAddRequest {
            messages,
            resource_id: &self.credentials.resource_id,
            metadata: SessionMetadata {
                default_user_id: SessionOwner::Many(container_tags),
                default_assistant_id: DEFAULT_ASSISTANT_ID,
                time: chrono::Utc::now().timestamp_millis(),
                session_id: Some(conversation_id),
            },
        };
        let body = self.post_json(SESSION_ADD_PATH, &request).await?;
        Ok(wire::decode_ingest(&body, conversation_id))
    }
}

#[async_trait]
impl MemoryBackend for VikingMemory {
    fn name(&self) -> &str {
        "viking"
    }

    async fn search_memories(
        &self,
        query: &str,
        container_tag: &str,
        options: &SearchOptions,
    ) -> OperationResult<SearchMemories> {
        let result = self.try_search(query, container_tag, options).await;
        self.finish("search_memories", result)
    }

    async fn get_profile(
        &self,
        container_tag: Option<&str>,
        query: Option<&str>,
        options: &ProfileOptions,
    ) -> OperationResult<GetProfile> {
        let result = self.try_get_profile(container_tag, query, options).await;
        self.finish("get_profile", result)
    }

    async fn add_memory(
        &self,
        content: &str,
        container_tag: &str,
        metadata: Option<&Metadata>,
    ) -> OperationResult<AddMemory> {
        let result = self.try_add(content, container_tag, metadata).await;
        self.finish("add_memory", result)
    }

    async fn delete_memory(&self, memory_id: &str) -> OperationResult<DeleteMemory> {
        let result = self.try_delete(memory_id).await;
        self.finish("delete_memory", result)
    }

    async fn list_memories(
        &self,
        container_tag: &str,
        limit: usize,
        options: &ListOptions,
    ) -> OperationResult<ListMemories> {
        let result = self.try_list(container_tag, limit, options).await;
        self.finish("list_memories", result)
    }

    async fn ingest_conversation(
        &self,
        conversation_id: &str,
        messages: &[ConversationMessage],
        container_tags: &[String],
        metadata: Option<&Metadata>,
    ) -> OperationResult<IngestConversation> {
        let result = self
            .try_ingest(conversation_id, messages, container_tags, metadata)
            .await;
        self.finish("ingest_conversation", result)
    }
}
