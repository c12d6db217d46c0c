//! Command-line and environment configuration for the server binary.

use std::time::Duration;

use clap::Parser;
use todo_core::{DispatcherConfig, ItemStore, TodoItem};

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server")]
#[command(about = "In-memory todo list served over HTTP", long_about = None)]
pub struct ServerConfig {
    /// Address to bind.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Commands that may wait in the dispatcher queue.
    #[arg(long, env = "TODO_QUEUE_CAPACITY", default_value_t = 32,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub queue_capacity: u32,

    /// How long a request waits for the dispatcher before giving up.
    #[arg(long, env = "TODO_REQUEST_TIMEOUT_MS", default_value_t = 5000)]
    pub request_timeout_ms: u64,

    /// Item names to pre-seed the list with (repeatable).
    #[arg(long = "seed", value_name = "NAME")]
    pub seed: Vec<String>,
}

impl ServerConfig {
    /// `host:port` as passed to the listener.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn dispatcher_config(&self) -> DispatcherConfig {
        DispatcherConfig {
            queue_capacity: self.queue_capacity as usize,
            reply_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }

    /// The store the dispatcher starts with: the seed names, all incomplete.
    pub fn initial_store(&self) -> ItemStore {
        ItemStore::with_items(self.seed.iter().map(TodoItem::new))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            queue_capacity: 32,
            request_timeout_ms: 5000,
            seed: Vec::new(),
        }
    }
}
