use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use campus_share_api::{CreateItemRequest, ItemResponse, MessageResponse, UpdateItemRequest};
use uuid::Uuid;

use super::run_blocking;
use crate::auth::extractors::AuthClaims;
use crate::error::AppError;
use crate::response::AppResponse;
use crate::services::catalog::CatalogService;

/// GET /api/items
pub async fn list_items(
    _claims: AuthClaims,
    State(catalog): State<Arc<CatalogService>>,
) -> Result<AppResponse<Vec<ItemResponse>>, AppError> {
    let items = run_blocking(move || catalog.list_items()).await?;
    Ok(AppResponse::ok(items))
}

/// GET /api/items/my-listings
pub async fn my_listings(
    AuthClaims(identity): AuthClaims,
    State(catalog): State<Arc<CatalogService>>,
) -> Result<AppResponse<Vec<ItemResponse>>, AppError> {
    let items = run_blocking(move || catalog.list_owned_items(identity.account_id)).await?;
    Ok(AppResponse::ok(items))
}

/// POST /api/items
pub async fn create_item(
    AuthClaims(identity): AuthClaims,
    State(catalog): State<Arc<CatalogService>>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<AppResponse<ItemResponse>, AppError> {
    let Json(payload) = payload?;
    let item = run_blocking(move || catalog.create_item(identity.account_id, payload)).await?;
    Ok(AppResponse::created(item))
}

/// PUT /api/items/{id}
pub async fn update_item(
    AuthClaims(identity): AuthClaims,
    State(catalog): State<Arc<CatalogService>>,
    item_id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateItemRequest>, JsonRejection>,
) -> Result<AppResponse<ItemResponse>, AppError> {
    let Path(item_id) = item_id?;
    let Json(payload) = payload?;
    let item =
        run_blocking(move || catalog.update_item(identity.account_id, item_id, payload)).await?;
    Ok(AppResponse::ok(item))
}

/// DELETE /api/items/{id}
pub async fn delete_item(
    AuthClaims(identity): AuthClaims,
    State(catalog): State<Arc<CatalogService>>,
    item_id: Result<Path<Uuid>, PathRejection>,
) -> Result<AppResponse<MessageResponse>, AppError> {
    let Path(item_id) = item_id?;
    run_blocking(move || catalog.delete_item(identity.account_id, item_id)).await?;
    Ok(AppResponse::ok(MessageResponse::new(
        "Item deleted successfully",
    )))
}
