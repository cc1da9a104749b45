use axum::{Json, http::StatusCode};

/// GET /api/health
/// Simple healthcheck endpoint
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "OK",
            "message": "Server is running"
        })),
    )
}
