pub mod activity;
pub mod auth;
pub mod health;
pub mod items;
pub mod messages;
pub mod requests;
pub mod users;

use crate::error::AppError;

/// Runs a synchronous service call (diesel, bcrypt) off the async workers.
pub(crate) async fn run_blocking<T, F>(task: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| AppError::internal(format!("Blocking task failed: {e}")))?
}
