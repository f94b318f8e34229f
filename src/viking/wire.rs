//! Request bodies and response decoders for the Viking memory API.
//!
//! Decoders are total: they read whatever fields are present and fall back
//! to empty lists, zero counts and empty strings, so a partial envelope can
//! never fail an otherwise successful call.

use std::cmp::Ordering;

use chrono::{DateTime, SecondsFormat};
use serde::Serialize;
use serde_json::Value;

use crate::memory::types::{
    ConversationMessage, IngestConversation, ListMemories, ListOptions, ListedMemory, MemoryRecord,
    Pagination, ProfileView, SearchMemories, SortOrder,
};

pub const EVENT_MEMORY_TYPE: &str = "sys_event_vibe_coding_v1";
pub const PROFILE_MEMORY_TYPE: &str = "sys_profile_vibe_coding_v1";
pub const DEFAULT_ASSISTANT_ID: &str = "opencode";

/// Page size requested by `list_memories`; the caller's limit only shapes
/// pagination.
pub const LIST_PAGE_SIZE: usize = 5000;

pub const SEARCH_PATH: &str = "/api/memory/event/search";
pub const PROFILE_PATH: &str = "/api/memory/profile/search";
pub const SESSION_ADD_PATH: &str = "/api/memory/session/add";
pub const DELETE_PATH: &str = "/api/memory/event/delete";

// ── Requests ─────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MemoryFilter<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assistant_id: Option<&'a str>,
    pub memory_type: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<&'a str>,
    pub filter: MemoryFilter<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    pub resource_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ProfileRequest<'a> {
    pub filter: MemoryFilter<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<&'a str>,
    pub resource_id: &'a str,
}

/// Owning identity of a session: one container tag for a single memory,
/// every tag of a conversation for ingest.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SessionOwner<'a> {
    One(&'a str),
    Many(&'a [String]),
}

#[derive(Debug, Serialize)]
pub struct SessionMetadata<'a> {
    pub default_user_id: SessionOwner<'a>,
    pub default_assistant_id: &'a str,
    /// Epoch milliseconds
    pub time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct SessionAddRequest<'a> {
    pub messages: &'a [ConversationMessage],
    pub resource_id: &'a str,
    pub metadata: SessionMetadata<'a>,
}

#[derive(Debug, Serialize)]
pub struct DeleteRequest<'a> {
    pub memory_id: &'a str,
    pub resource_id: &'a str,
}

// ── Decoders ─────────────────────────────────────────────────

fn data(body: &Value) -> Option<&Value> {
    body.get("data").filter(|d| d.is_object())
}

fn result_list(body: &Value) -> &[Value] {
    data(body)
        .and_then(|d| d.get("result_list"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn data_count(body: &Value) -> Option<u64> {
    data(body).and_then(|d| d.get("count")).and_then(Value::as_u64)
}

fn string_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn item_id(item: &Value) -> String {
    string_field(item.get("id")).unwrap_or_default()
}

/// Strings pass through; structured payloads are JSON-encoded; a missing
/// payload becomes `{}`.
fn stringify_payload(payload: Option<&Value>) -> String {
    match payload {
        None | Some(Value::Null) => "{}".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Epoch milliseconds become ISO-8601 UTC (`2024-01-01T00:00:00.000Z`);
/// strings pass through; anything else is empty.
fn created_at(time: Option<&Value>) -> String {
    match time {
        Some(Value::Number(n)) => {
            #[allow(clippy::cast_possible_truncation)]
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64));
            match millis {
                Some(0) | None => String::new(),
                Some(ms) => DateTime::from_timestamp_millis(ms).map_or_else(
                    || n.to_string(),
                    |dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true),
                ),
            }
        }
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

pub fn decode_search(body: &Value) -> SearchMemories {
    let results: Vec<MemoryRecord> = result_list(body)
        .iter()
        .map(|item| {
            MemoryRecord::new(
                item_id(item),
                stringify_payload(item.get("memory_info")),
                item.get("score").and_then(Value::as_f64),
            )
        })
        .collect();

    SearchMemories {
        total: data_count(body).unwrap_or(results.len() as u64),
        results,
        timing: 0,
    }
}

pub fn decode_profile(body: &Value) -> ProfileView {
    let dynamic = result_list(body)
        .iter()
        .filter_map(|item| match item.get("memory_info") {
            None | Some(Value::Null) => None,
            payload => Some(stringify_payload(payload)),
        })
        .collect();

    ProfileView {
        static_items: Vec::new(),
        dynamic,
    }
}

pub fn decode_session_id(body: &Value) -> String {
    string_field(data(body).and_then(|d| d.get("session_id"))).unwrap_or_default()
}

pub fn decode_list(body: &Value, limit: usize) -> ListMemories {
    let memories: Vec<ListedMemory> = result_list(body)
        .iter()
        .map(|item| ListedMemory {
            id: item_id(item),
            summary: stringify_payload(item.get("memory_info")),
            created_at: created_at(item.get("time")),
        })
        .collect();

    let total_items = data_count(body).unwrap_or(memories.len() as u64);
    let per_page = limit.max(1) as u64;

    ListMemories {
        memories,
        pagination: Pagination {
            current_page: 1,
            total_items,
            total_pages: total_items.div_ceil(per_page).max(1),
        },
    }
}

pub fn decode_ingest(body: &Value, conversation_id: &str) -> IngestConversation {
    let from_either = |key: &str| {
        string_field(body.get(key)).or_else(|| string_field(data(body).and_then(|d| d.get(key))))
    };

    IngestConversation {
        id: decode_session_id(body),
        conversation_id: from_either("conversationId")
            .unwrap_or_else(|| conversation_id.to_string()),
        status: from_either("status").unwrap_or_default(),
    }
}

/// Client-side ordering for `list_memories`. Only `createdAt` is a known
/// sort key. Entries are ordered by parsed instant; timestamps that do not
/// parse as RFC 3339 go last in backend order.
pub fn apply_list_order(memories: &mut [ListedMemory], options: &ListOptions) {
    if options.sort.as_deref() != Some("createdAt") {
        return;
    }
    let instant = |m: &ListedMemory| DateTime::parse_from_rfc3339(&m.created_at).ok();
    memories.sort_by(|a, b| match (instant(a), instant(b)) {
        (Some(a), Some(b)) => match options.order {
            SortOrder::Asc => a.cmp(&b),
            SortOrder::Desc => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
