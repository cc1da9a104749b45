//! # campus-share-api
//!
//! Shared API types for the campus-share service.
//! This crate is designed to be WASM-compatible and can be used in both
//! backend (Rust) and frontend (WASM/TypeScript via wasm-bindgen) applications.
//!
//! ## Features
//!
//! - Request DTOs (RegisterRequest, CreateItemRequest, SendMessageRequest, ...)
//! - Response DTOs (AccountResponse, ItemResponse, ConversationSummary, ...)
//! - Shared vocabulary (AccountKind, RequestStatus and its transition rules)
//! - Error response format (ErrorResponse)
//! - Generic response wrapper (AppResponse)
//!
//! ## Example
//!
//! ```rust
//! use campus_share_api::{AccountKind, LoginRequest};
//!
//! let request = LoginRequest {
//!     email: Some("user@example.com".to_string()),
//!     password: Some("password123".to_string()),
//!     kind: Some(AccountKind::Employee),
//! };
//! ```

pub mod error;
pub mod requests;
pub mod responses;
pub mod result;
pub mod types;

// Re-exports for convenient access
pub use error::ErrorResponse;
pub use requests::*;
pub use responses::*;
pub use result::{AppResponse, StatusCode};
pub use types::{AccountKind, ParseEnumError, RequestStatus};
