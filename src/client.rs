//! Caller-facing facade over a [`MemoryBackend`].
//!
//! Every operation is bounded by a deadline (30 s by default) and applies
//! configured defaults. When the deadline passes, the backend future is
//! dropped, which aborts the in-flight HTTP request, and the caller gets a
//! failed result.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::config::VikingConfig;
use crate::error::{ConfigError, MemoryError};
use crate::memory::{
    AddMemory, ConversationMessage, DeleteMemory, GetProfile, IngestConversation, ListMemories,
    ListOptions, MemoryBackend, Metadata, OperationResult, ProfileOptions, SearchExperienceCards,
    SearchMemories, SearchOptions, SortOrder, search_result_from_profile,
};
use crate::viking::VikingMemory;
use crate::viking::wire::{DEFAULT_ASSISTANT_ID, PROFILE_MEMORY_TYPE};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_LIST_LIMIT: usize = 20;
const SEARCH_MODE: &str = "hybrid";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub similarity_threshold: f64,
    pub max_memories: usize,
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::from(&VikingConfig::default())
    }
}

impl From<&VikingConfig> for ClientSettings {
    fn from(config: &VikingConfig) -> Self {
        Self {
            similarity_threshold: config.similarity_threshold,
            max_memories: config.max_memories,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Clone)]
pub struct VikingMemoryClient {
    backend: Arc<dyn MemoryBackend>,
    settings: ClientSettings,
}

impl VikingMemoryClient {
    pub fn new(backend: Arc<dyn MemoryBackend>, settings: ClientSettings) -> Self {
        Self { backend, settings }
    }

    /// Build the Viking adapter from resolved configuration and wrap it.
    ///
    /// This is the one fallible step: without an API key and resource id
    /// there is nothing to talk to.
    pub fn from_config(config: &VikingConfig) -> Result<Self, ConfigError> {
        let backend = VikingMemory::from_config(config)?;
        Ok(Self::new(Arc::new(backend), ClientSettings::from(config)))
    }

    /// Deadline for every operation. The Viking adapter sets no overall
    /// request timeout of its own, so this is the limit callers observe.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    async fn bounded<T: Default>(
        &self,
        operation: &'static str,
        call: impl Future<Output = OperationResult<T>>,
    ) -> OperationResult<T> {
        tracing::debug!(operation, backend = self.backend.name(), "start");
        match tokio::time::timeout(self.settings.timeout, call).await {
            Ok(result) => {
                // The backend already warned about its own failures.
                if let Some(error) = result.error() {
                    tracing::debug!(operation, error, "memory operation failed");
                }
                result
            }
            Err(_) => {
                let error = MemoryError::Timeout {
                    millis: self.settings.timeout.as_millis(),
                };
                tracing::warn!(operation, %error, "memory operation timed out");
                OperationResult::failure(error.to_string())
            }
        }
    }

    pub async fn search_memories(
        &self,
        query: &str,
        container_tag: &str,
    ) -> OperationResult<SearchMemories> {
        let options = SearchOptions {
            threshold: Some(self.settings.similarity_threshold),
            limit: Some(self.settings.max_memories),
            search_mode: Some(SEARCH_MODE.to_string()),
        };
        let result = self
            .bounded(
                "search_memories",
                self.backend.search_memories(query, container_tag, &options),
            )
            .await;
        if result.success {
            tracing::info!(
                container_tag,
                count = result.data.results.len(),
                "search_memories: success"
            );
        }
        result
    }

    pub async fn get_profile(
        &self,
        container_tag: &str,
        query: Option<&str>,
    ) -> OperationResult<GetProfile> {
        let options = ProfileOptions::default();
        let result = self
            .bounded(
                "get_profile",
                self.backend.get_profile(Some(container_tag), query, &options),
            )
            .await;
        if result.success {
            tracing::info!(
                container_tag,
                items = result.data.profile.dynamic.len(),
                "get_profile: success"
            );
        }
        result
    }

    pub async fn add_memory(
        &self,
        content: &str,
        container_tag: &str,
        metadata: Option<&Metadata>,
    ) -> OperationResult<AddMemory> {
        tracing::debug!(container_tag, content_length = content.len(), "add_memory");
        let result = self
            .bounded(
                "add_memory",
                self.backend.add_memory(content, container_tag, metadata),
            )
            .await;
        if result.success {
            tracing::info!(id = %result.data.id, "add_memory: success");
        }
        result
    }

    pub async fn delete_memory(&self, memory_id: &str) -> OperationResult<DeleteMemory> {
        let result = self
            .bounded("delete_memory", self.backend.delete_memory(memory_id))
            .await;
        if result.success {
            tracing::info!(memory_id, "delete_memory: success");
        }
        result
    }

    pub async fn list_memories(
        &self,
        container_tag: &str,
        limit: usize,
    ) -> OperationResult<ListMemories> {
        let options = ListOptions {
            order: SortOrder::Desc,
            sort: Some("createdAt".to_string()),
        };
        let result = self
            .bounded(
                "list_memories",
                self.backend.list_memories(container_tag, limit, &options),
            )
            .await;
        if result.success {
            tracing::info!(
                container_tag,
                count = result.data.memories.len(),
                "list_memories: success"
            );
        }
        result
    }

    pub async fn ingest_conversation(
        &self,
        conversation_id: &str,
        messages: &[ConversationMessage],
        container_tags: &[String],
        metadata: Option<&Metadata>,
    ) -> OperationResult<IngestConversation> {
        tracing::debug!(
            conversation_id,
            message_count = messages.len(),
            "ingest_conversation"
        );
        let result = self
            .bounded(
                "ingest_conversation",
                self.backend
                    .ingest_conversation(conversation_id, messages, container_tags, metadata),
            )
            .await;
        if result.success {
            tracing::info!(
                conversation_id,
                status = %result.data.status,
                "ingest_conversation: success"
            );
        }
        result
    }

    /// Experience cards derived from an unscoped profile lookup filtered to
    /// the assistant's profile memories.
    pub async fn search_experience_cards(
        &self,
        query: &str,
    ) -> OperationResult<SearchExperienceCards> {
        tracing::debug!(query_length = query.len(), "search_experience_cards");
        let options = ProfileOptions {
            memory_type: Some(PROFILE_MEMORY_TYPE.to_string()),
            assistant_id: Some(DEFAULT_ASSISTANT_ID.to_string()),
        };
        let profile = self
            .bounded(
                "search_experience_cards",
                self.backend.get_profile(None, Some(query), &options),
            )
            .await;
        let result = search_result_from_profile(profile);
        if result.success {
            tracing::info!(count = result.data.total, "search_experience_cards: success");
        }
        result
    }
}
