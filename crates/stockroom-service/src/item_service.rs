//! Item service: orchestrates the store and the cache.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::dto::{CreateItemRequest, ItemResponse, UpdateItemRequest};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use stockroom_config::CacheConfig;
use stockroom_core::{Item, ItemId, NewItem, StockroomError, StockroomResult, ValidateExt};
use stockroom_repository::ItemRepository;
use tracing::{debug, info};

/// Item service trait.
#[async_trait]
pub trait ItemService: Send + Sync {
    /// Creates a new item. Fails if an item with the same name exists.
    async fn create_item(&self, request: CreateItemRequest) -> StockroomResult<ItemResponse>;

    /// Gets an item by ID, reading through the cache.
    async fn get_item(&self, id: ItemId) -> StockroomResult<ItemResponse>;

    /// Replaces an item's fields and invalidates its cache entry.
    async fn update_item(
        &self,
        id: ItemId,
        request: UpdateItemRequest,
    ) -> StockroomResult<ItemResponse>;

    /// Deletes an item and invalidates its cache entry.
    async fn delete_item(&self, id: ItemId) -> StockroomResult<()>;
}

/// Item service implementation.
///
/// Reads populate the cache on a miss; writes invalidate by deleting the
/// cached key, never by updating it in place. The next read after a write
/// repopulates from the store.
pub struct ItemServiceImpl<R: ItemRepository> {
    item_repository: Arc<R>,
    cache: Arc<dyn CacheInterface>,
    cache_ttl: Duration,
    cache_prefix: String,
}

impl<R: ItemRepository> ItemServiceImpl<R> {
    /// Creates a new item service.
    pub fn new(
        item_repository: Arc<R>,
        cache: Arc<dyn CacheInterface>,
        cache_config: &CacheConfig,
    ) -> Self {
        Self {
            item_repository,
            cache,
            cache_ttl: cache_config.ttl(),
            cache_prefix: cache_config.key_prefix.clone(),
        }
    }

    fn cache_key(&self, id: ItemId) -> String {
        cache_keys::item_by_id(&self.cache_prefix, id)
    }
}

#[async_trait]
impl<R: ItemRepository + 'static> ItemService for ItemServiceImpl<R> {
    async fn create_item(&self, request: CreateItemRequest) -> StockroomResult<ItemResponse> {
        debug!("Creating item: {}", request.name);

        // Name uniqueness is checked first; the store's unique index is the
        // authoritative backstop for concurrent creates.
        if self.item_repository.exists_by_name(&request.name).await? {
            return Err(StockroomError::Conflict("Item already exists.".to_string()));
        }

        request.validate_request()?;

        let item = self
            .item_repository
            .insert(&NewItem::new(
                request.name,
                request.description,
                request.quantity,
            ))
            .await?;

        info!("Created item {} ({})", item.id, item.name);
        Ok(ItemResponse::from(item))
    }

    async fn get_item(&self, id: ItemId) -> StockroomResult<ItemResponse> {
        let key = self.cache_key(id);

        if let Some(item) = self.cache.get::<Item>(&key).await? {
            debug!("Serving item {} from cache", id);
            return Ok(ItemResponse::from(item));
        }

        let item = self
            .item_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| StockroomError::not_found("Item", id))?;

        // Cache population is best-effort; the store result stands on its own.
        let _ = self.cache.set(&key, &item, self.cache_ttl).await;

        Ok(ItemResponse::from(item))
    }

    async fn update_item(
        &self,
        id: ItemId,
        request: UpdateItemRequest,
    ) -> StockroomResult<ItemResponse> {
        debug!("Updating item: {}", id);

        let mut item = self
            .item_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| StockroomError::not_found("Item", id))?;

        request.validate_request()?;

        item.apply(request.name, request.description, request.quantity);
        let item = self.item_repository.replace(&item).await?;

        // Invalidate, never update in place.
        let _ = self.cache.delete(&self.cache_key(id)).await;

        info!("Updated item {}", id);
        Ok(ItemResponse::from(item))
    }

    async fn delete_item(&self, id: ItemId) -> StockroomResult<()> {
        debug!("Deleting item: {}", id);

        let deleted = self.item_repository.delete(id).await?;
        if !deleted {
            return Err(StockroomError::not_found("Item", id));
        }

        // Idempotent whether or not a cache entry existed.
        let _ = self.cache.delete(&self.cache_key(id)).await;

        info!("Deleted item {}", id);
        Ok(())
    }
}
