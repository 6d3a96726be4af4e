//! MySQL item repository implementation.

use crate::{pool::DatabasePool, traits::ItemRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::sync::Arc;
use stockroom_core::{Item, ItemId, NewItem, StockroomError, StockroomResult};
use tracing::debug;

/// MySQL item repository implementation.
#[derive(Clone)]
pub struct MySqlItemRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlItemRepository {
    /// Creates a new MySQL item repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of an item.
#[derive(Debug, FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    description: String,
    quantity: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            id: ItemId::from_i64(row.id),
            name: row.name,
            description: row.description,
            quantity: row.quantity,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ItemRepository for MySqlItemRepository {
    async fn find_by_id(&self, id: ItemId) -> StockroomResult<Option<Item>> {
        debug!("Finding item by id: {}", id);

        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, name, description, quantity, created_at, updated_at
            FROM items
            WHERE id = ?
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Item::from))
    }

    async fn find_by_name(&self, name: &str) -> StockroomResult<Option<Item>> {
        debug!("Finding item by name: {}", name);

        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, name, description, quantity, created_at, updated_at
            FROM items
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Item::from))
    }

    async fn exists_by_name(&self, name: &str) -> StockroomResult<bool> {
        let result: Option<i32> = sqlx::query_scalar("SELECT 1 FROM items WHERE name = ? LIMIT 1")
            .bind(name)
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(result.is_some())
    }

    async fn insert(&self, item: &NewItem) -> StockroomResult<Item> {
        debug!("Inserting new item: {}", item.name);

        // MySQL doesn't support RETURNING, so insert then select
        let result = sqlx::query(
            r#"
            INSERT INTO items (name, description, quantity)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.quantity)
        .execute(self.pool.inner())
        .await?;

        let id = ItemId::from_i64(result.last_insert_id() as i64);

        self.find_by_id(id)
            .await?
            .ok_or_else(|| StockroomError::Internal("Failed to fetch inserted item".to_string()))
    }

    async fn replace(&self, item: &Item) -> StockroomResult<Item> {
        debug!("Replacing item: {}", item.id);

        sqlx::query(
            r#"
            UPDATE items
            SET name = ?, description = ?, quantity = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.quantity)
        .bind(item.updated_at)
        .bind(item.id.into_inner())
        .execute(self.pool.inner())
        .await?;

        self.find_by_id(item.id)
            .await?
            .ok_or_else(|| StockroomError::Internal("Failed to fetch updated item".to_string()))
    }

    async fn delete(&self, id: ItemId) -> StockroomResult<bool> {
        debug!("Deleting item: {}", id);

        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for MySqlItemRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlItemRepository").finish_non_exhaustive()
    }
}
