//! Item storage for actors

use serde::{Deserialize, Serialize};

use crate::core::types::EntityId;

/// Ordered list of carried item ids, bounded by capacity
///
/// The capacity bound is enforced at the action boundary (pickup), not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    pub capacity: usize,
    pub items: Vec<EntityId>,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::new(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn contains(&self, item: EntityId) -> bool {
        self.items.contains(&item)
    }

    /// Remove an item id, returning whether it was present
    pub fn remove(&mut self, item: EntityId) -> bool {
        if let Some(index) = self.items.iter().position(|&id| id == item) {
            self.items.remove(index);
            true
        } else {
            false
        }
    }
}
