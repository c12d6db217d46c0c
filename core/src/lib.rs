//! Item store and single-writer command dispatcher for the todo service.
//!
//! # Overview
//! All reads and writes of the todo collection go through one [`Dispatcher`]
//! task that exclusively owns the [`ItemStore`]. Callers hold a cloneable
//! [`TodoHandle`] and submit commands over a bounded queue, each with its own
//! one-shot reply channel.
//!
//! # Design
//! - The store has no interior locking; the dispatcher loop is the only code
//!   that ever touches it, so every operation is atomic with respect to the
//!   others.
//! - Items are addressed by their current position. Deleting index `k`
//!   shifts every later item down by one, so an index kept across requests
//!   can end up pointing at a different item.
//! - Submission and the wait for a reply share one deadline, and a closed
//!   queue fails fast with [`DispatchError::Unavailable`].

pub mod dispatcher;
pub mod error;
pub mod store;
pub mod types;

pub use dispatcher::{Dispatcher, DispatcherConfig, TodoHandle};
pub use error::{DispatchError, StoreError};
pub use store::ItemStore;
pub use types::{CreateItem, TodoItem};
