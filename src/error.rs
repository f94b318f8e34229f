use thiserror::Error;

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    MissingCredential(&'static str),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

// ─── Remote memory errors ───────────────────────────────────────────────────

/// Failure of a single remote memory call.
///
/// `Display` output is exactly what ends up in `OperationResult::error`, so
/// the formats below are part of the public contract.
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Decode(String),

    #[error("Timeout after {millis}ms")]
    Timeout { millis: u128 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<reqwest::Error> for MemoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for MemoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
