use serde::{Deserialize, Serialize};

/// HTTP status codes the campus-share API emits on success.
/// WASM-compatible: does not depend on `axum::http::StatusCode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCode {
    Ok = 200,
    Created = 201,
    NoContent = 204,
}

/// Generic API response wrapper.
///
/// The backend wraps this in a type that implements Axum's `IntoResponse`.
///
/// ```rust
/// use campus_share_api::{AppResponse, StatusCode};
///
/// let response = AppResponse::created("new_item");
/// assert_eq!(response.status, StatusCode::Created);
///
/// let empty: AppResponse<()> = AppResponse::no_content();
/// assert!(empty.data.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub status: StatusCode,
}

impl<T> AppResponse<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        Self {
            status,
            data: Some(data),
        }
    }

    pub fn empty(status: StatusCode) -> Self {
        Self { status, data: None }
    }

    /// 200 OK with data
    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::Ok, data)
    }

    /// 201 Created with data
    pub fn created(data: T) -> Self {
        Self::new(StatusCode::Created, data)
    }
}

impl AppResponse<()> {
    /// 204 No Content
    pub fn no_content() -> Self {
        Self::empty(StatusCode::NoContent)
    }
}
