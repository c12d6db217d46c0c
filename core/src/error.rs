//! Error types for store operations and command submission.
//!
//! # Design
//! [`StoreError`] is what the store itself rejects; it always travels back
//! to the caller as a value inside the reply. [`DispatchError`] adds the
//! ways a submission can fail without the store ever seeing the command.

/// Rejection of a single store operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The item name was empty or whitespace only.
    #[error("name cannot be empty")]
    Validation,

    /// The index is outside `0..len` at the time the command ran.
    #[error("item at specified index does not exist")]
    NotFound { index: i64 },
}

/// Errors returned by [`TodoHandle`](crate::TodoHandle) methods and by
/// [`Dispatcher::shutdown`](crate::Dispatcher::shutdown).
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The store rejected the command.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The dispatcher has stopped: the queue is closed, or the command was
    /// still queued when the loop exited and its reply slot was dropped.
    #[error("todo service is unavailable")]
    Unavailable,

    /// No reply arrived before the deadline.
    #[error("timed out waiting for the todo service")]
    Timeout,

    /// The dispatcher task panicked.
    #[error("dispatcher task failed: {0}")]
    Crashed(#[from] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_messages() {
        assert_eq!(StoreError::Validation.to_string(), "name cannot be empty");
        assert_eq!(
            StoreError::NotFound { index: 3 }.to_string(),
            "item at specified index does not exist"
        );
    }

    #[test]
    fn dispatch_error_store_is_transparent() {
        let err = DispatchError::from(StoreError::Validation);
        assert_eq!(err.to_string(), "name cannot be empty");
    }

    #[test]
    fn dispatch_error_unavailable_display() {
        assert_eq!(
            DispatchError::Unavailable.to_string(),
            "todo service is unavailable"
        );
    }

    const _: () = {
        #[allow(dead_code)]
        fn assert_send_sync<T: Send + Sync>() {}

        #[allow(dead_code)]
        fn check() {
            assert_send_sync::<StoreError>();
            assert_send_sync::<DispatchError>();
        }
    };
}
