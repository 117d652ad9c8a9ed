//! Unified error types for the console engine

use std::collections::BTreeMap;
use thiserror::Error;

/// Inline validation messages, keyed by field name
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Engine error type
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(String),

    /// Backend rejected the request
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// One or more drafts failed validation; one entry per draft, in batch
    /// order (empty maps for drafts that passed)
    #[error("one or more drafts failed validation")]
    Validation(Vec<FieldErrors>),

    /// A mini-order needs at least one selected service
    #[error("select at least one service")]
    EmptyServiceSelection,

    /// Batch submission halted partway; already-created orders stay created
    #[error("submission failed after {submitted} of {total} order(s): {message}")]
    Submission {
        submitted: usize,
        total: usize,
        message: String,
    },

    /// The authoring session was closed while work was in flight
    #[error("session cancelled")]
    Cancelled,
}

impl ConsoleError {
    /// Wrap a transport-level failure
    pub fn http(err: impl ToString) -> Self {
        Self::Http(err.to_string())
    }

    /// Wrap a malformed-response failure
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }
}

/// Result type for engine operations
pub type ConsoleResult<T> = Result<T, ConsoleError>;
