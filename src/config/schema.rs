use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://api-knowledgebase.mlp.cn-beijing.volces.com";

pub const API_KEY_ENV: &str = "VIKING_MEMORY_API_KEY";
pub const RESOURCE_ID_ENV: &str = "VIKING_MEMORY_RESOURCE_ID";
pub const BASE_URL_ENV: &str = "VIKING_MEMORY_BASE_URL";

const DEFAULT_FILTER_PROMPT: &str = "You are a stateful coding agent. Remember all the information, including but not limited to user's coding preferences, tech stack, behaviours, workflows, and any other relevant details.";

/// Settings read from `viking_memory.jsonc`.
///
/// Keys are camelCase on disk. Every field has a default, so a partial file
/// (or none at all) still yields a usable value; only the credentials have
/// no default.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VikingConfig {
    pub api_key: Option<String>,
    pub resource_id: Option<String>,
    pub base_url: Option<String>,
    /// Minimum similarity a caller should treat as relevant (0.0–1.0)
    pub similarity_threshold: f64,
    /// Max memories returned per search
    pub max_memories: usize,
    pub max_project_memories: usize,
    pub max_profile_items: usize,
    pub inject_profile: bool,
    /// Prefix for derived container tags
    pub container_tag_prefix: String,
    pub filter_prompt: String,
    /// Extra keyword regexes, appended to the built-in list
    pub keyword_patterns: Vec<String>,
    pub compression_threshold: f64,
    /// Adds `X-Viking-Debug: 1` to requests and raises log verbosity
    pub debug: bool,
}

impl Default for VikingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            resource_id: None,
            base_url: None,
            similarity_threshold: 0.6,
            max_memories: 5,
            max_project_memories: 10,
            max_profile_items: 5,
            inject_profile: true,
            container_tag_prefix: "opencode".into(),
            filter_prompt: DEFAULT_FILTER_PROMPT.into(),
            keyword_patterns: Vec::new(),
            compression_threshold: 0.8,
            debug: false,
        }
    }
}

impl std::fmt::Debug for VikingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VikingConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("resource_id", &self.resource_id)
            .field("base_url", &self.base_url)
            .field("similarity_threshold", &self.similarity_threshold)
            .field("max_memories", &self.max_memories)
            .field("max_project_memories", &self.max_project_memories)
            .field("max_profile_items", &self.max_profile_items)
            .field("inject_profile", &self.inject_profile)
            .field("container_tag_prefix", &self.container_tag_prefix)
            .field("keyword_patterns", &self.keyword_patterns)
            .field("compression_threshold", &self.compression_threshold)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl VikingConfig {
    pub fn is_configured(&self) -> bool {
        non_empty(self.api_key.as_deref()).is_some()
    }

    /// Base URL with any trailing slash removed, validated as http(s).
    pub fn normalized_base_url(&self) -> Result<String, ConfigError> {
        let raw = non_empty(self.base_url.as_deref()).unwrap_or(DEFAULT_BASE_URL);
        normalize_base_url(raw)
    }

    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let api_key =
            non_empty(self.api_key.as_deref()).ok_or(ConfigError::MissingCredential(API_KEY_ENV))?;
        let resource_id = non_empty(self.resource_id.as_deref())
            .ok_or(ConfigError::MissingCredential(RESOURCE_ID_ENV))?;
        let base_url = self.normalized_base_url()?;

        Ok(Credentials {
            api_key: api_key.to_string(),
            resource_id: resource_id.to_string(),
            base_url,
        })
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let url = reqwest::Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidBaseUrl(format!("{raw}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl(format!(
            "{raw}: scheme must be http or https"
        )));
    }
    if url.host_str().is_none() {
        return Err(ConfigError::InvalidBaseUrl(format!("{raw}: missing host")));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Resolved connection settings for the remote service.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub resource_id: String,
    pub base_url: String,
}

impl Credentials {
    pub fn new(
        api_key: impl Into<String>,
        resource_id: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        let resource_id = resource_id.into();
        let base_url = base_url.into();

        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential(API_KEY_ENV));
        }
        if resource_id.trim().is_empty() {
            return Err(ConfigError::MissingCredential(RESOURCE_ID_ENV));
        }

        Ok(Self {
            api_key,
            resource_id,
            base_url: normalize_base_url(&base_url)?,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[REDACTED]")
            .field("resource_id", &self.resource_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}
