use async_trait::async_trait;

use super::result::OperationResult;
use super::types::{
    AddMemory, ConversationMessage, DeleteMemory, GetProfile, IngestConversation, ListMemories,
    ListOptions, Metadata, ProfileOptions, SearchMemories, SearchOptions,
};

/// One method per remote memory capability.
///
/// Implementations never return `Err` or panic for remote misbehavior: HTTP
/// errors, network failures and undecodable bodies all come back as a failed
/// [`OperationResult`].
#[async_trait]
pub trait MemoryBackend: Send + Sync {
    /// Backend name for diagnostics
    fn name(&self) -> &str;

    async fn search_memories(
        &self,
        query: &str,
        container_tag: &str,
        options: &SearchOptions,
    ) -> OperationResult<SearchMemories>;

    /// `container_tag = None` searches across every container.
    async fn get_profile(
        &self,
        container_tag: Option<&str>,
        query: Option<&str>,
        options: &ProfileOptions,
    ) -> OperationResult<GetProfile>;

    async fn add_memory(
        &self,
        content: &str,
        container_tag: &str,
        metadata: Option<&Metadata>,
    ) -> OperationResult<AddMemory>;

    async fn delete_memory(&self, memory_id: &str) -> OperationResult<DeleteMemory>;

    async fn list_memories(
        &self,
        container_tag: &str,
        limit: usize,
        options: &ListOptions,
    ) -> OperationResult<ListMemories>;

    async fn ingest_conversation(
        &self,
        conversation_id: &str,
        messages: &[ConversationMessage],
        container_tags: &[String],
        metadata: Option<&Metadata>,
    ) -> OperationResult<IngestConversation>;
}
