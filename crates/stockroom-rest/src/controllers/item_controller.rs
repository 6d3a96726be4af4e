//! Item CRUD controller.

use crate::{
    extractors::{ApiJson, AuthenticatedUser},
    responses::{created, ok, ApiResult, AppError, SuccessBody},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use stockroom_core::ItemId;
use stockroom_service::{CreateItemRequest, ItemPayload, ItemResponse, UpdateItemRequest};
use tracing::debug;

/// Creates the item router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_item))
        .route("/:id/", get(read_item))
        .route("/:id/update/", put(update_item))
        .route("/:id/delete/", delete(delete_item))
}

/// Create a new item.
async fn create_item(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiJson(payload): ApiJson<ItemPayload>,
) -> Result<(StatusCode, Json<ItemResponse>), AppError> {
    let request = CreateItemRequest::try_from(payload)?;
    debug!("Create item request: {}", request.name);

    let response = state.item_service.create_item(request).await?;
    Ok(created(response))
}

/// Read an item by ID.
async fn read_item(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<ItemResponse> {
    debug!("Read item request: {}", id);

    let response = state.item_service.get_item(ItemId::from_i64(id)).await?;
    ok(response)
}

/// Replace an item's fields.
async fn update_item(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<ItemPayload>,
) -> ApiResult<ItemResponse> {
    debug!("Update item request: {}", id);

    let request = UpdateItemRequest::try_from(payload)?;

    let response = state
        .item_service
        .update_item(ItemId::from_i64(id), request)
        .await?;
    ok(response)
}

/// Delete an item.
async fn delete_item(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<SuccessBody> {
    debug!("Delete item request: {}", id);

    state.item_service.delete_item(ItemId::from_i64(id)).await?;
    ok(SuccessBody {
        success: "Item deleted.".to_string(),
    })
}
