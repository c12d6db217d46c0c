//! Error types for the todo API client.
//!
//! # Design
//! The statuses the server uses on purpose each get a variant: 404 for a
//! missing item on reads, 400 for a malformed index and 503 when the server
//! cannot reach its dispatcher. Everything else lands in `Http` with the raw
//! status and body. The server reports a missing item on PUT/DELETE as a
//! 500, so those show up as `Http { status: 500, .. }`.

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server returned 404.
    #[error("item not found")]
    NotFound,

    /// The server returned 400 for the index segment.
    #[error("invalid request parameter: {0}")]
    InvalidParameter(String),

    /// The server returned 503.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Any other unexpected status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}
