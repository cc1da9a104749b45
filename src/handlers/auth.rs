// src/handlers/auth.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use campus_share_api::{AuthResponse, LoginRequest, RegisterRequest};

use super::run_blocking;
use crate::auth::extractors::ClientContext;
use crate::auth::services::IdentityService;
use crate::error::AppError;
use crate::response::AppResponse;

/// POST /api/auth/register
/// Inscription d'un nouveau compte
pub async fn register(
    State(identity): State<Arc<IdentityService>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<AppResponse<AuthResponse>, AppError> {
    let Json(payload) = payload?;
    let created = run_blocking(move || identity.create_account(payload)).await?;
    Ok(AppResponse::created(created))
}

/// POST /api/auth/login
/// Connexion avec le rôle explicite (admin ou employee)
pub async fn login(
    State(identity): State<Arc<IdentityService>>,
    client: ClientContext,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<AppResponse<AuthResponse>, AppError> {
    let Json(payload) = payload?;
    let session = run_blocking(move || identity.authenticate(&payload, &client)).await?;
    Ok(AppResponse::ok(session))
}
