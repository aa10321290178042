use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use uuid::Uuid;

use crate::domain::value_objects::auth::SessionClaims;

/// Verification key for dashboard bearer tokens, shared through a request extension.
pub struct JwtKeys {
    decoding_key: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn validate(&self, token: &str) -> anyhow::Result<SessionClaims> {
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| anyhow::anyhow!("JWT validation failed: {}", e))?;
        Ok(token_data.claims)
    }
}

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    (
                        StatusCode::UNAUTHORIZED,
                        "Missing or invalid Authorization header".to_string(),
                    )
                })?;

        let keys = parts.extensions.get::<Arc<JwtKeys>>().ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Auth is not configured".to_string(),
        ))?;

        let claims = keys
            .validate(bearer.token())
            .map_err(|e| (StatusCode::UNAUTHORIZED, e.to_string()))?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                "Invalid user ID in token".to_string(),
            )
        })?;

        Ok(AuthUser {
            user_id,
            email: claims.email,
        })
    }
}
