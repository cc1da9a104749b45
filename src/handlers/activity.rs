use std::sync::Arc;

use axum::extract::{Query, State, rejection::QueryRejection};
use campus_share_api::{LoginLogPage, LoginLogPageQuery, LoginLogResponse, StatsResponse};

use super::run_blocking;
use crate::auth::extractors::AuthClaims;
use crate::error::AppError;
use crate::response::AppResponse;
use crate::services::activity::ActivityService;

/// GET /api/stats
pub async fn stats(
    _claims: AuthClaims,
    State(activity): State<Arc<ActivityService>>,
) -> Result<AppResponse<StatsResponse>, AppError> {
    let stats = run_blocking(move || activity.stats()).await?;
    Ok(AppResponse::ok(stats))
}

/// GET /api/login-logs
/// Les 50 dernières connexions de l'appelant
pub async fn my_login_logs(
    AuthClaims(identity): AuthClaims,
    State(activity): State<Arc<ActivityService>>,
) -> Result<AppResponse<Vec<LoginLogResponse>>, AppError> {
    let logs = run_blocking(move || activity.my_login_logs(identity.account_id)).await?;
    Ok(AppResponse::ok(logs))
}

/// GET /api/login-logs/all?page=&limit=
/// Réservé aux administrateurs
pub async fn all_login_logs(
    AuthClaims(identity): AuthClaims,
    State(activity): State<Arc<ActivityService>>,
    query: Result<Query<LoginLogPageQuery>, QueryRejection>,
) -> Result<AppResponse<LoginLogPage>, AppError> {
    let Query(query) = query?;
    let page = run_blocking(move || activity.all_login_logs(identity.kind, &query)).await?;
    Ok(AppResponse::ok(page))
}
