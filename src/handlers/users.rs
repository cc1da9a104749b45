use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use campus_share_api::{AccountResponse, AccountSearchQuery, AccountSummary, UpdateProfileRequest};
use uuid::Uuid;

use super::run_blocking;
use crate::auth::extractors::AuthClaims;
use crate::auth::services::IdentityService;
use crate::error::AppError;
use crate::response::AppResponse;
use crate::services::conversations::ConversationService;

/// GET /api/users/search?email=
/// Recherche d'employés par email pour démarrer une conversation
pub async fn search_users(
    AuthClaims(identity): AuthClaims,
    State(conversations): State<Arc<ConversationService>>,
    query: Result<Query<AccountSearchQuery>, QueryRejection>,
) -> Result<AppResponse<Vec<AccountSummary>>, AppError> {
    let Query(query) = query?;
    let found =
        run_blocking(move || conversations.search_accounts(identity.account_id, query.email))
            .await?;
    Ok(AppResponse::ok(found))
}

/// GET /api/users/{id}
pub async fn get_user(
    _claims: AuthClaims,
    State(identity): State<Arc<IdentityService>>,
    account_id: Result<Path<Uuid>, PathRejection>,
) -> Result<AppResponse<AccountResponse>, AppError> {
    let Path(account_id) = account_id?;
    let profile = run_blocking(move || identity.get_profile(account_id)).await?;
    Ok(AppResponse::ok(profile))
}

/// PUT /api/users/{id}
/// Mise à jour de son propre profil
pub async fn update_user(
    AuthClaims(caller): AuthClaims,
    State(identity): State<Arc<IdentityService>>,
    account_id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<AppResponse<AccountResponse>, AppError> {
    let Path(account_id) = account_id?;
    let Json(payload) = payload?;
    let profile =
        run_blocking(move || identity.update_profile(caller.account_id, account_id, payload))
            .await?;
    Ok(AppResponse::ok(profile))
}
