//! Single-writer command loop that owns the [`ItemStore`].
//!
//! The loop runs on a tokio task and takes commands off a bounded `mpsc`
//! queue one at a time. Each command runs to completion against the store
//! before the next is read, which linearizes every operation without a lock.
//!
//! Public API: [`Dispatcher`] (owns the task and the shutdown signal) and
//! [`TodoHandle`] (cloneable submission handle). Commands themselves are
//! crate-private, so a handle is the only way to reach the store.

use std::future::Future;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::error::{DispatchError, StoreError};
use crate::store::ItemStore;
use crate::types::TodoItem;

/// Queue depth used when none is configured.
pub const DEFAULT_QUEUE_CAPACITY: usize = 32;

/// Reply deadline used when none is configured.
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(5);

/// Tuning for the command queue and for callers waiting on replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Commands that can wait in the queue before submitters are suspended.
    /// Must be at least 1.
    pub queue_capacity: usize,
    /// Deadline covering both submission and the wait for the reply.
    pub reply_timeout: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            reply_timeout: DEFAULT_REPLY_TIMEOUT,
        }
    }
}

type Reply<T> = oneshot::Sender<Result<T, StoreError>>;

/// One store operation plus the slot its result goes back on. Only
/// [`TodoHandle`] builds these.
#[derive(Debug)]
pub(crate) enum Command {
    Create { name: String, reply: Reply<()> },
    Get { index: i64, reply: Reply<TodoItem> },
    GetAll { reply: oneshot::Sender<Vec<TodoItem>> },
    MarkComplete { index: i64, reply: Reply<()> },
    Delete { index: i64, reply: Reply<()> },
}

impl Command {
    fn kind(&self) -> &'static str {
        match self {
            Command::Create { .. } => "create",
            Command::Get { .. } => "get",
            Command::GetAll { .. } => "get_all",
            Command::MarkComplete { .. } => "mark_complete",
            Command::Delete { .. } => "delete",
        }
    }

    /// Run against the store and send exactly one reply. A caller that has
    /// already given up leaves a closed slot; the result is dropped.
    fn execute(self, store: &mut ItemStore) {
        match self {
            Command::Create { name, reply } => {
                let _ = reply.send(log_rejection(store.create(&name)));
            }
            Command::Get { index, reply } => {
                let _ = reply.send(log_rejection(store.get(index)));
            }
            Command::GetAll { reply } => {
                let _ = reply.send(store.get_all());
            }
            Command::MarkComplete { index, reply } => {
                let _ = reply.send(log_rejection(store.mark_complete(index)));
            }
            Command::Delete { index, reply } => {
                let _ = reply.send(log_rejection(store.delete(index)));
            }
        }
    }
}

fn log_rejection<T>(result: Result<T, StoreError>) -> Result<T, StoreError> {
    if let Err(err) = &result {
        tracing::debug!(error = %err, "command rejected by store");
    }
    result
}

/// Runs the command loop until shutdown is signalled or every sender is
/// dropped, then returns the store.
///
/// The `select!` is biased toward the shutdown signal, so once it fires no
/// further command is executed even if some are already queued. Those are
/// dropped with the receiver, which closes their reply slots.
async fn run_loop(
    mut store: ItemStore,
    mut rx: mpsc::Receiver<Command>,
    mut shutdown: oneshot::Receiver<()>,
) -> ItemStore {
    tracing::info!(items = store.len(), "dispatcher started");
    // Set once the `Dispatcher` is dropped without calling `shutdown`.
    let mut detached = false;

    loop {
        tokio::select! {
            biased;

            signal = &mut shutdown, if !detached => match signal {
                Ok(()) => {
                    tracing::info!("shutdown signal received");
                    break;
                }
                Err(_) => detached = true,
            },

            cmd = rx.recv() => match cmd {
                Some(cmd) => {
                    let kind = cmd.kind();
                    cmd.execute(&mut store);
                    tracing::debug!(command = kind, items = store.len(), "command executed");
                }
                None => break,
            },
        }
    }

    rx.close();
    let dropped = std::iter::from_fn(|| rx.try_recv().ok()).count();
    if dropped > 0 {
        tracing::warn!(dropped, "discarding commands queued at shutdown");
    }
    tracing::info!(items = store.len(), "dispatcher stopped");
    store
}

/// Owner of the running dispatcher loop.
///
/// Dropping a `Dispatcher` without calling [`shutdown`](Self::shutdown)
/// leaves the loop serving until every [`TodoHandle`] is gone.
#[derive(Debug)]
pub struct Dispatcher {
    handle: TodoHandle,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<ItemStore>,
}

impl Dispatcher {
    /// Move `store` into a new dispatcher task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(store: ItemStore, config: DispatcherConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(run_loop(store, rx, shutdown_rx));
        Self {
            handle: TodoHandle {
                sender: tx,
                timeout: config.reply_timeout,
            },
            shutdown: shutdown_tx,
            task,
        }
    }

    /// A new submission handle for this dispatcher.
    pub fn handle(&self) -> TodoHandle {
        self.handle.clone()
    }

    /// Signal shutdown, wait for the loop to exit and take back the store.
    ///
    /// Handles still held elsewhere fail with
    /// [`DispatchError::Unavailable`] from then on.
    ///
    /// # Errors
    ///
    /// [`DispatchError::Crashed`] if the loop task panicked.
    pub async fn shutdown(self) -> Result<ItemStore, DispatchError> {
        // The loop may already have exited because every handle was dropped.
        let _ = self.shutdown.send(());
        Ok(self.task.await?)
    }
}

/// Cloneable async handle for submitting commands to a [`Dispatcher`].
#[derive(Debug, Clone)]
pub struct TodoHandle {
    sender: mpsc::Sender<Command>,
    timeout: Duration,
}

impl TodoHandle {
    /// Append a new item named `name`.
    ///
    /// # Errors
    ///
    /// * [`DispatchError::Store`] with [`StoreError::Validation`] for a blank name.
    /// * [`DispatchError::Unavailable`] / [`DispatchError::Timeout`] if no
    ///   reply can be obtained.
    pub async fn create(&self, name: impl Into<String>) -> Result<(), DispatchError> {
        let name = name.into();
        self.request(|reply| Command::Create { name, reply })
            .await?
            .map_err(DispatchError::from)
    }

    /// Fetch a copy of the item at `index`.
    pub async fn get(&self, index: i64) -> Result<TodoItem, DispatchError> {
        self.request(|reply| Command::Get { index, reply })
            .await?
            .map_err(DispatchError::from)
    }

    /// Snapshot of the whole collection.
    pub async fn get_all(&self) -> Result<Vec<TodoItem>, DispatchError> {
        self.request(|reply| Command::GetAll { reply }).await
    }

    pub async fn mark_complete(&self, index: i64) -> Result<(), DispatchError> {
        self.request(|reply| Command::MarkComplete { index, reply })
            .await?
            .map_err(DispatchError::from)
    }

    pub async fn delete(&self, index: i64) -> Result<(), DispatchError> {
        self.request(|reply| Command::Delete { index, reply })
            .await?
            .map_err(DispatchError::from)
    }

    /// `false` once the dispatcher loop has exited.
    pub fn is_alive(&self) -> bool {
        !self.sender.is_closed()
    }

    /// Submit a command built around a fresh reply slot and wait for the
    /// answer, all under one deadline.
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, DispatchError> {
        let (tx, rx) = oneshot::channel();
        let cmd = build(tx);
        let kind = cmd.kind();
        with_deadline(self.timeout, kind, async {
            self.sender.send(cmd).await.map_err(|_| {
                tracing::warn!(command = kind, "dispatcher queue closed");
                DispatchError::Unavailable
            })?;
            rx.await.map_err(|_| {
                tracing::warn!(command = kind, "command dropped before a reply was sent");
                DispatchError::Unavailable
            })
        })
        .await
    }
}

async fn with_deadline<T>(
    timeout: Duration,
    kind: &'static str,
    fut: impl Future<Output = Result<T, DispatchError>>,
) -> Result<T, DispatchError> {
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_elapsed) => {
            tracing::warn!(command = kind, ?timeout, "no reply before deadline");
            Err(DispatchError::Timeout)
        }
    }
}
