//! The ordered todo collection and its per-operation rules.
//!
//! `ItemStore` assumes a single owner. It is moved into the dispatcher loop
//! and never shared, so it carries no lock.

use crate::error::StoreError;
use crate::types::TodoItem;

/// Insertion-ordered list of todo items, addressed by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStore {
    items: Vec<TodoItem>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with `items`, in iteration order.
    pub fn with_items(items: impl IntoIterator<Item = TodoItem>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a new, incomplete item. Duplicate names are allowed.
    ///
    /// # Errors
    ///
    /// [`StoreError::Validation`] if `name` is empty after trimming.
    pub fn create(&mut self, name: &str) -> Result<(), StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::Validation);
        }
        self.items.push(TodoItem::new(name));
        Ok(())
    }

    /// Copy of the item at `index`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] unless `0 <= index < len`.
    pub fn get(&self, index: i64) -> Result<TodoItem, StoreError> {
        let pos = self.position(index)?;
        Ok(self.items[pos].clone())
    }

    /// Snapshot of every item in current order. Later mutations do not show
    /// through the returned vector.
    pub fn get_all(&self) -> Vec<TodoItem> {
        self.items.clone()
    }

    /// Set the item's `complete` flag. Marking a completed item again is a
    /// no-op that still succeeds.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] unless `0 <= index < len`.
    pub fn mark_complete(&mut self, index: i64) -> Result<(), StoreError> {
        let pos = self.position(index)?;
        self.items[pos].complete = true;
        Ok(())
    }

    /// Remove the item at `index`, shifting later items down by one.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] unless `0 <= index < len`.
    pub fn delete(&mut self, index: i64) -> Result<(), StoreError> {
        let pos = self.position(index)?;
        self.items.remove(pos);
        Ok(())
    }

    /// Bounds check shared by every indexed operation.
    fn position(&self, index: i64) -> Result<usize, StoreError> {
        usize::try_from(index)
            .ok()
            .filter(|&pos| pos < self.items.len())
            .ok_or(StoreError::NotFound { index })
    }
}
