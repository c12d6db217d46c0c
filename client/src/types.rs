//! Wire DTOs for the todo API.
//!
//! Mirrors the server's JSON schema (`Name`, `Complete`) without depending
//! on it.

use serde::{Deserialize, Serialize};

/// A todo item as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Complete", alias = "complete")]
    pub complete: bool,
}

/// Request payload for creating an item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateItem {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
}

impl CreateItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
