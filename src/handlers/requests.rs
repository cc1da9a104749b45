use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use campus_share_api::{
    BorrowRequestResponse, CreateBorrowRequest, RequestListResponse, UpdateRequestStatusRequest,
};
use uuid::Uuid;

use super::run_blocking;
use crate::auth::extractors::AuthClaims;
use crate::error::AppError;
use crate::response::AppResponse;
use crate::services::lending::LendingService;

/// GET /api/requests
/// Demandes envoyées et reçues par l'appelant
pub async fn list_requests(
    AuthClaims(identity): AuthClaims,
    State(lending): State<Arc<LendingService>>,
) -> Result<AppResponse<RequestListResponse>, AppError> {
    let requests = run_blocking(move || lending.list_requests(identity.account_id)).await?;
    Ok(AppResponse::ok(requests))
}

/// POST /api/requests
pub async fn create_request(
    AuthClaims(identity): AuthClaims,
    State(lending): State<Arc<LendingService>>,
    payload: Result<Json<CreateBorrowRequest>, JsonRejection>,
) -> Result<AppResponse<BorrowRequestResponse>, AppError> {
    let Json(payload) = payload?;
    let item_id = payload
        .item_id
        .ok_or_else(|| AppError::validation("itemId is required"))?;
    let request =
        run_blocking(move || lending.create_request(identity.account_id, item_id)).await?;
    Ok(AppResponse::created(request))
}

/// PUT /api/requests/{id}
/// Décision du propriétaire: approved, rejected ou completed
pub async fn update_request_status(
    AuthClaims(identity): AuthClaims,
    State(lending): State<Arc<LendingService>>,
    request_id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateRequestStatusRequest>, JsonRejection>,
) -> Result<AppResponse<BorrowRequestResponse>, AppError> {
    let Path(request_id) = request_id?;
    let Json(payload) = payload?;
    let request = run_blocking(move || {
        lending.update_request_status(identity.account_id, request_id, payload.status.as_deref())
    })
    .await?;
    Ok(AppResponse::ok(request))
}
