use serde::{Deserialize, Serialize};

/// Free-form metadata a caller may attach to writes.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A single search hit, normalized from the backend's `result_list` item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub id: String,
    pub memory: String,
    pub chunk: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl MemoryRecord {
    pub fn new(id: impl Into<String>, content: impl Into<String>, similarity: Option<f64>) -> Self {
        let content = content.into();
        Self {
            id: id.into(),
            chunk: content.clone(),
            memory: content,
            similarity,
        }
    }

    /// Stringified payload of the memory.
    pub fn content(&self) -> &str {
        &self.memory
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchMemories {
    pub results: Vec<MemoryRecord>,
    pub total: u64,
    pub timing: u64,
}

/// Aggregated profile facts for a container.
///
/// The backend does not distinguish static from dynamic facets, so every
/// item lands in `dynamic` and `static_items` stays empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileView {
    #[serde(rename = "static")]
    pub static_items: Vec<String>,
    pub dynamic: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GetProfile {
    pub profile: ProfileView,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AddMemory {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeleteMemory {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListedMemory {
    pub id: String,
    pub summary: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_items: 0,
            total_pages: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListMemories {
    pub memories: Vec<ListedMemory>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngestConversation {
    pub id: String,
    #[serde(rename = "conversationId")]
    pub conversation_id: String,
    pub status: String,
}

/// Reusable snippet synthesized from profile data; never stored as such.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceCard {
    pub id: String,
    pub memory: String,
    pub chunk: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchExperienceCards {
    pub results: Vec<ExperienceCard>,
    pub total: u64,
    pub timing: u64,
}

// ── Conversation messages ────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: String,
    pub content: MessageContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ConversationMessage {
    pub fn new(role: impl Into<String>, content: impl Into<MessageContent>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        }
    }
}

// ── Call options ─────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    /// Advisory only; the search endpoint has no threshold field.
    pub threshold: Option<f64>,
    pub limit: Option<usize>,
    /// Advisory only, e.g. `"hybrid"`.
    pub search_mode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileOptions {
    pub memory_type: Option<String>,
    pub assistant_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub order: SortOrder,
    /// Only `"createdAt"` reorders results; other keys keep backend order.
    pub sort: Option<String>,
}
