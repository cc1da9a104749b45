use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::{HeaderMap, header, request::Parts};

use crate::auth::jwt::Identity;
use crate::auth::services::IdentityService;
use crate::error::AppError;

const UNKNOWN: &str = "unknown";

/// Extracteur d'authentification pour les routes protégées.
/// Valide `Authorization: Bearer <JWT>` via `IdentityService::resolve_token`
/// et expose l'identité de l'appelant.
#[derive(Debug, Clone)]
pub struct AuthClaims(pub Identity);

impl<S> FromRequestParts<S> for AuthClaims
where
    Arc<IdentityService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Header absent ou vide: pas de token
        let auth_str = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::MissingToken)?
            .to_str()
            .map_err(|_| AppError::InvalidToken)?;

        // Doit être de type Bearer
        let token = auth_str
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or(AppError::InvalidToken)?;
        if token.is_empty() {
            return Err(AppError::MissingToken);
        }

        let identity = Arc::<IdentityService>::from_ref(state).resolve_token(token)?;
        Ok(AuthClaims(identity))
    }
}

/// Where a request came from, as far as proxies let us tell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientContext {
    pub ip_address: String,
    pub user_agent: String,
}

impl ClientContext {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header_str = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        // Premier maillon de X-Forwarded-For, sinon X-Real-IP
        let ip_address = header_str("x-forwarded-for")
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .or_else(|| header_str("x-real-ip"))
            .unwrap_or(UNKNOWN)
            .to_string();

        let user_agent = header_str(header::USER_AGENT.as_str())
            .unwrap_or(UNKNOWN)
            .to_string();

        Self {
            ip_address,
            user_agent,
        }
    }
}

impl<S> FromRequestParts<S> for ClientContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
