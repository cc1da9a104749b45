use campus_share_api::AccountKind;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Token generation failed: {0}")]
    GenerationFailed(jsonwebtoken::errors::Error),
    #[error("Token verification failed: {0}")]
    VerificationFailed(jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: AccountKind,
    pub exp: i64,
    pub iat: i64,
}

/// Who is calling, as carried by a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub account_id: Uuid,
    pub email: String,
    pub kind: AccountKind,
}

impl From<Claims> for Identity {
    fn from(c: Claims) -> Self {
        Self {
            account_id: c.sub,
            email: c.email,
            kind: c.role,
        }
    }
}

#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_hours: i64,
}

impl JwtManager {
    pub fn new(secret: &str, expiration_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            expiration_hours,
        }
    }

    /// Génère un access token avec la durée configurée
    pub fn generate_access_token(
        &self,
        account_id: Uuid,
        email: &str,
        kind: AccountKind,
    ) -> Result<String, JwtError> {
        self.generate_token(account_id, email, kind, self.expiration_hours)
    }

    pub fn expiration_hours(&self) -> i64 {
        self.expiration_hours
    }

    pub fn generate_token(
        &self,
        account_id: Uuid,
        email: &str,
        kind: AccountKind,
        expires_in_hours: i64,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let exp = (now + Duration::hours(expires_in_hours)).timestamp();

        let claims = Claims {
            sub: account_id,
            email: email.to_string(),
            role: kind,
            exp,
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(JwtError::GenerationFailed)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(JwtError::VerificationFailed)
    }
}
