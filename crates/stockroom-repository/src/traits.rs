//! Repository trait definitions.

use async_trait::async_trait;
use stockroom_core::{Item, ItemId, NewItem, NewUser, StockroomResult, User};

/// Item repository trait.
///
/// The store is authoritative; a UNIQUE index on `name` enforces the
/// uniqueness invariant even when the service-level check races.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Finds an item by ID.
    async fn find_by_id(&self, id: ItemId) -> StockroomResult<Option<Item>>;

    /// Finds an item by name.
    async fn find_by_name(&self, name: &str) -> StockroomResult<Option<Item>>;

    /// Checks if an item with the given name exists.
    async fn exists_by_name(&self, name: &str) -> StockroomResult<bool>;

    /// Inserts a new item. The store assigns the ID.
    async fn insert(&self, item: &NewItem) -> StockroomResult<Item>;

    /// Replaces the mutable fields of an existing item (same ID).
    async fn replace(&self, item: &Item) -> StockroomResult<Item>;

    /// Deletes an item by ID. Returns `true` if a row was removed.
    async fn delete(&self, id: ItemId) -> StockroomResult<bool>;
}

/// User repository trait, used by the token endpoints.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by username.
    async fn find_by_username(&self, username: &str) -> StockroomResult<Option<User>>;

    /// Inserts a new user. The store assigns the ID.
    async fn insert(&self, user: &NewUser) -> StockroomResult<User>;

    /// Counts all users.
    async fn count(&self) -> StockroomResult<u64>;
}
