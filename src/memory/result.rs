use serde::Serialize;

use crate::error::MemoryError;

/// Outcome of a memory operation.
///
/// Serializes flattened: `{"success": true, ...data}` or
/// `{"success": false, "error": "...", ...defaulted data}`. On failure `data`
/// holds `T::default()`, so a caller can read the same fields whichever way
/// the call went.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationResult<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

impl<T> OperationResult<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            error: None,
            data,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl<T: Default> OperationResult<T> {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            data: T::default(),
        }
    }
}

impl<T: Default> From<Result<T, MemoryError>> for OperationResult<T> {
    fn from(result: Result<T, MemoryError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::failure(err.to_string()),
        }
    }
}
