//! Item entity.

use crate::ItemId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inventory item entity.
///
/// The store is authoritative for items; cached representations are a
/// derived, disposable view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier, assigned by the store on creation.
    pub id: ItemId,

    /// Item name. At most one item exists with a given name at any time.
    pub name: String,

    /// Free-text description.
    pub description: String,

    /// Quantity on hand. No non-negativity is enforced.
    pub quantity: f64,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Replaces the mutable fields of this item (full replace, same id).
    pub fn apply(&mut self, name: String, description: String, quantity: f64) {
        self.name = name;
        self.description = description;
        self.quantity = quantity;
        self.updated_at = Utc::now();
    }
}

/// An item draft that has not been persisted yet (no id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub quantity: f64,
}

impl NewItem {
    /// Creates a new item draft.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, quantity: f64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_replaces_all_fields() {
        let now = Utc::now();
        let mut item = Item {
            id: ItemId(1),
            name: "Widget".to_string(),
            description: "d".to_string(),
            quantity: 10.0,
            created_at: now,
            updated_at: now,
        };

        item.apply("Gadget".to_string(), "e".to_string(), 20.0);

        assert_eq!(item.id, ItemId(1));
        assert_eq!(item.name, "Gadget");
        assert_eq!(item.description, "e");
        assert_eq!(item.quantity, 20.0);
        assert!(item.updated_at >= now);
    }
}
