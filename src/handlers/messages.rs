use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use campus_share_api::{ConversationSummary, SendMessageRequest, ThreadMessage, ThreadResponse};

use super::run_blocking;
use crate::auth::extractors::AuthClaims;
use crate::error::AppError;
use crate::response::AppResponse;
use crate::services::conversations::ConversationService;

/// GET /api/messages/conversations
pub async fn list_conversations(
    AuthClaims(identity): AuthClaims,
    State(conversations): State<Arc<ConversationService>>,
) -> Result<AppResponse<Vec<ConversationSummary>>, AppError> {
    let summaries =
        run_blocking(move || conversations.list_conversations(identity.account_id)).await?;
    Ok(AppResponse::ok(summaries))
}

/// GET /api/messages/{email}
/// Fil de discussion avec un employé; marque les messages reçus comme lus
pub async fn get_thread(
    AuthClaims(identity): AuthClaims,
    State(conversations): State<Arc<ConversationService>>,
    other_email: Result<Path<String>, PathRejection>,
) -> Result<AppResponse<ThreadResponse>, AppError> {
    let Path(other_email) = other_email?;
    let thread =
        run_blocking(move || conversations.get_thread(identity.account_id, &other_email)).await?;
    Ok(AppResponse::ok(thread))
}

/// POST /api/messages
pub async fn send_message(
    AuthClaims(identity): AuthClaims,
    State(conversations): State<Arc<ConversationService>>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<AppResponse<ThreadMessage>, AppError> {
    let Json(payload) = payload?;
    let message = run_blocking(move || {
        conversations.send_message(identity.account_id, payload.receiver_email, payload.text)
    })
    .await?;
    Ok(AppResponse::created(message))
}
