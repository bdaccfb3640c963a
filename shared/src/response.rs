//! Mutation result shape
//!
//! Every admin mutation reports back with the same structure so the admin
//! form can show the message to a human without inspecting error types:
//!
//! ```json
//! { "success": false, "error": "Service 42 not found", "code": 6001 }
//! ```

use crate::error::{AppError, AppResult, ErrorCode};
use serde::{Deserialize, Serialize};

/// Outcome of an admin mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResult<T> {
    pub success: bool,
    /// The written entity (present on success when there is one)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Failure code, lets callers tell "storage full" apart from "not found"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

impl<T> MutationResult<T> {
    /// Successful mutation carrying the written value
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
        }
    }

    /// Failed mutation
    pub fn failure(err: &AppError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(err.message.clone()),
            code: Some(err.code),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Whether the failure was caused by the store running out of room
    pub fn is_storage_full(&self) -> bool {
        self.code == Some(ErrorCode::StorageFull)
    }

    /// Drop the payload, keeping only the outcome
    pub fn discard(self) -> MutationResult<()> {
        MutationResult {
            success: self.success,
            data: self.success.then_some(()),
            error: self.error,
            code: self.code,
        }
    }
}

impl MutationResult<()> {
    /// Successful mutation without a payload
    pub fn ok() -> Self {
        Self::success(())
    }
}

impl<T> From<AppResult<T>> for MutationResult<T> {
    fn from(result: AppResult<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::failure(&err),
        }
    }
}
