//! Cache key generators for consistent key naming.

use stockroom_core::ItemId;

/// Generate a cache key for an item by ID.
#[must_use]
pub fn item_by_id(prefix: &str, id: ItemId) -> String {
    format!("{}:item:id:{}", prefix, id)
}
