//! Domain types shared by the store, the HTTP layer and the client.
//!
//! Field names go over the wire capitalised (`Name`, `Complete`), the shape
//! existing consumers already parse. Deserialization also accepts the
//! lowercase spelling.

use serde::{Deserialize, Serialize};

/// A single todo entry. It has no identity of its own; its position in the
/// collection is its only handle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Complete", alias = "complete", default)]
    pub complete: bool,
}

impl TodoItem {
    /// A new, incomplete item.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            complete: false,
        }
    }
}

/// Request payload for creating an item. A missing name deserializes to an
/// empty string, which the store then rejects.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateItem {
    #[serde(rename = "Name", alias = "name", default)]
    pub name: String,
}

impl CreateItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_item_serializes_capitalised() {
        let json = serde_json::to_string(&TodoItem::new("Buy milk")).unwrap();
        assert_eq!(json, r#"{"Name":"Buy milk","Complete":false}"#);
    }

    #[test]
    fn todo_item_accepts_lowercase_fields() {
        let item: TodoItem = serde_json::from_str(r#"{"name":"Old","complete":true}"#).unwrap();
        assert_eq!(item.name, "Old");
        assert!(item.complete);
    }

    #[test]
    fn create_item_missing_name_is_empty() {
        let input: CreateItem = serde_json::from_str("{}").unwrap();
        assert!(input.name.is_empty());
    }

    #[test]
    fn create_item_accepts_either_spelling() {
        let lower: CreateItem = serde_json::from_str(r#"{"name":"a"}"#).unwrap();
        let upper: CreateItem = serde_json::from_str(r#"{"Name":"a"}"#).unwrap();
        assert_eq!(lower, upper);
        assert_eq!(serde_json::to_string(&upper).unwrap(), r#"{"Name":"a"}"#);
    }
}
