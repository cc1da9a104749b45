use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campus_share_api::{AppResponse as ApiResponse, StatusCode as ApiStatusCode};
use serde::Serialize;

/// Backend wrapper for campus-share-api's AppResponse that adds Axum integration.
///
/// ```rust,ignore
/// use crate::response::AppResponse;
///
/// AppResponse::ok(items)
/// AppResponse::created(new_item)
/// AppResponse::no_content()
/// ```
pub struct AppResponse<T> {
    inner: ApiResponse<T>,
}

impl<T> AppResponse<T>
where
    T: Serialize,
{
    pub fn new(inner: ApiResponse<T>) -> Self {
        Self { inner }
    }

    /// 200 OK with data
    pub fn ok(data: T) -> Self {
        Self::new(ApiResponse::ok(data))
    }

    /// 201 Created with data
    pub fn created(data: T) -> Self {
        Self::new(ApiResponse::created(data))
    }
}

impl AppResponse<()> {
    /// 204 No Content
    #[cfg(test)]
    pub fn no_content() -> Self {
        Self::new(ApiResponse::no_content())
    }
}

/// Converts API StatusCode to Axum's StatusCode
fn convert_status(api_status: ApiStatusCode) -> StatusCode {
    match api_status {
        ApiStatusCode::Ok => StatusCode::OK,
        ApiStatusCode::Created => StatusCode::CREATED,
        ApiStatusCode::NoContent => StatusCode::NO_CONTENT,
    }
}

impl<T> IntoResponse for AppResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let status = convert_status(self.inner.status);

        match self.inner.data {
            Some(data) => (status, Json(data)).into_response(),
            None => status.into_response(),
        }
    }
}
