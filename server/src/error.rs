//! Mapping from dispatcher results to HTTP error responses.
//!
//! # Design
//! Status codes depend on the route, not only on the error: a missing index
//! is a 404 for reads but a 500 for the two mutating routes. Handlers pick
//! the not-found status and pass it to [`ApiError::from_dispatch`]. Error
//! bodies are plain text carrying the error's message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use todo_core::{DispatchError, StoreError};

/// Message returned when the `{index}` path segment is not an integer.
pub const INVALID_PARAMETER: &str = "invalid request parameter type";

/// An HTTP error response: status plus plain-text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 for an index segment that does not parse as an integer.
    pub fn invalid_parameter() -> Self {
        Self::new(StatusCode::BAD_REQUEST, INVALID_PARAMETER)
    }

    /// Translate a dispatcher failure. `not_found` is the status this route
    /// uses for an out-of-range index.
    pub fn from_dispatch(err: DispatchError, not_found: StatusCode) -> Self {
        let status = match &err {
            DispatchError::Store(StoreError::Validation) => StatusCode::INTERNAL_SERVER_ERROR,
            DispatchError::Store(StoreError::NotFound { .. }) => not_found,
            DispatchError::Unavailable | DispatchError::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            DispatchError::Crashed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::warn!(%status, error = %err, "request failed");
        }
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}
