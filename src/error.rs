// src/error.rs

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campus_share_api::{ErrorResponse, ParseEnumError};

use crate::auth::jwt::JwtError;
use crate::auth::password::PasswordError;
use crate::db::error::RepositoryError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppError {
    // === Erreurs de Validation ===
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    DuplicateEmail(String),
    #[error("{0}")]
    InvalidStatus(String),

    // === Erreurs métier ===
    #[error("Item is not available")]
    NotAvailable,
    #[error("Cannot borrow your own item")]
    SelfBorrow,
    #[error("Cannot send message to yourself")]
    SelfMessage,

    // === Erreurs d'Authentification ===
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Access token required")]
    MissingToken,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("{0}")]
    Forbidden(String),

    // === Erreurs Repository ===
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    NotFoundOrUnauthorized(String),
    #[error("Database error: {0}")]
    Database(String),

    // === Erreurs de Hashing/Cryptographie ===
    #[error("Password hashing failed: {0}")]
    PasswordHashingFailed(String),
    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    // === Erreurs internes ===
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, internal_detail) = self.get_error_info();

        if let Some(ref detail) = internal_detail {
            tracing::error!(%status, detail, "Internal server error");
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl AppError {
    /// Récupère le statut, le message public et le détail interne éventuel
    fn get_error_info(&self) -> (StatusCode, String, Option<String>) {
        match self {
            // 400 Bad Request
            AppError::Validation(_)
            | AppError::DuplicateEmail(_)
            | AppError::InvalidStatus(_)
            | AppError::NotAvailable
            | AppError::SelfBorrow
            | AppError::SelfMessage => (StatusCode::BAD_REQUEST, self.to_string(), None),

            // 401 Unauthorized
            AppError::InvalidCredentials | AppError::MissingToken => {
                (StatusCode::UNAUTHORIZED, self.to_string(), None)
            }

            // 403 Forbidden
            AppError::InvalidToken | AppError::Forbidden(_) => {
                (StatusCode::FORBIDDEN, self.to_string(), None)
            }

            // 404 Not Found
            AppError::NotFound(_) | AppError::NotFoundOrUnauthorized(_) => {
                (StatusCode::NOT_FOUND, self.to_string(), None)
            }

            // 500 Internal Server Error
            AppError::Database(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred with the database".to_string(),
                Some(msg.clone()),
            ),
            AppError::PasswordHashingFailed(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred while processing your request".to_string(),
                Some(msg.clone()),
            ),
            AppError::TokenGenerationFailed(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred while generating token".to_string(),
                Some(msg.clone()),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred".to_string(),
                Some(msg.clone()),
            ),
        }
    }

    // === Constructeurs helpers ===
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn duplicate_email(msg: impl Into<String>) -> Self {
        AppError::DuplicateEmail(msg.into())
    }

    pub fn invalid_status(msg: impl Into<String>) -> Self {
        AppError::InvalidStatus(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn not_found_or_unauthorized(msg: impl Into<String>) -> Self {
        AppError::NotFoundOrUnauthorized(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Retourne le code de statut HTTP
    pub fn status_code(&self) -> StatusCode {
        self.get_error_info().0
    }
}

// === Conversions automatiques depuis d'autres types d'erreurs ===

// Depuis RepositoryError
impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => AppError::NotFound(msg),
            RepositoryError::Pool(_)
            | RepositoryError::UniqueViolation(_)
            | RepositoryError::ConstraintViolation(_)
            | RepositoryError::Database(_) => AppError::Database(err.to_string()),
        }
    }
}

// Depuis JwtError
impl From<JwtError> for AppError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::GenerationFailed(e) => AppError::TokenGenerationFailed(e.to_string()),
            JwtError::VerificationFailed(_) => AppError::InvalidToken,
        }
    }
}

// Depuis PasswordError
impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::PasswordHashingFailed(err.to_string())
    }
}

// Une valeur stockée hors vocabulaire est une corruption, pas une erreur client
impl From<ParseEnumError> for AppError {
    fn from(err: ParseEnumError) -> Self {
        AppError::Internal(err.to_string())
    }
}

// Depuis les rejections axum
impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        AppError::Validation(err.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(err: QueryRejection) -> Self {
        AppError::Validation(err.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(err: PathRejection) -> Self {
        AppError::Validation(err.body_text())
    }
}
