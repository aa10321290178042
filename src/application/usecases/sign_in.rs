use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::{
    repositories::credentials::CredentialsProvider,
    value_objects::auth::{SessionClaims, SignInDto, SignInForm},
};

#[derive(Debug, Error)]
pub enum SignInError {
    #[error("Incorrect email or password.")]
    InvalidCredentials,
    #[error("Unexpected auth error.")]
    Unexpected(#[from] anyhow::Error),
}

impl SignInError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            SignInError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            SignInError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub struct SignInUseCase<P>
where
    P: CredentialsProvider + Send + Sync + 'static,
{
    credentials_provider: Arc<P>,
    jwt_secret: String,
    token_ttl_seconds: u64,
}

impl<P> SignInUseCase<P>
where
    P: CredentialsProvider + Send + Sync + 'static,
{
    pub fn new(credentials_provider: Arc<P>, jwt_secret: String, token_ttl_seconds: u64) -> Self {
        Self {
            credentials_provider,
            jwt_secret,
            token_ttl_seconds,
        }
    }

    pub async fn sign_in(&self, form: SignInForm) -> Result<SignInDto, SignInError> {
        let email = form.email.trim().to_lowercase();
        if email.is_empty() || form.password.is_empty() {
            warn!("sign_in: empty credentials");
            return Err(SignInError::InvalidCredentials);
        }

        let user = self
            .credentials_provider
            .verify(&email, &form.password)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "sign_in: credential check failed");
                SignInError::Unexpected(err)
            })?
            .ok_or_else(|| {
                warn!("sign_in: incorrect email or password");
                SignInError::InvalidCredentials
            })?;

        let issued_at = Utc::now().timestamp().max(0) as usize;
        let claims = SessionClaims {
            sub: user.id.to_string(),
            email: user.email,
            name: user.name,
            iat: issued_at,
            exp: issued_at.saturating_add(self.token_ttl_seconds as usize),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|err| {
            error!(error = ?err, "sign_in: failed to sign token");
            SignInError::Unexpected(err.into())
        })?;

        info!(user_id = %user.id, "sign_in: user signed in");

        Ok(SignInDto {
            access_token,
            token_type: "Bearer",
            expires_in: self.token_ttl_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use jsonwebtoken::{DecodingKey, Validation, decode};
    use uuid::Uuid;

    use crate::domain::repositories::credentials::{AuthenticatedUser, MockCredentialsProvider};

    const SECRET: &str = "supersecretjwtsecretforunittesting123";

    fn form(email: &str, password: &str) -> SignInForm {
        SignInForm {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn valid_credentials_yield_a_verifiable_token() {
        let user_id = Uuid::new_v4();
        let mut provider = MockCredentialsProvider::new();
        provider
            .expect_verify()
            .withf(|email, password| email == "user@nextmail.com" && password == "123456")
            .returning(move |email, _| {
                Ok(Some(AuthenticatedUser {
                    id: user_id,
                    name: "User".to_string(),
                    email: email.to_string(),
                }))
            });

        let usecase = SignInUseCase::new(Arc::new(provider), SECRET.to_string(), 3600);
        let signed_in = usecase
            .sign_in(form(" User@Nextmail.com ", "123456"))
            .await
            .unwrap();

        let claims = decode::<SessionClaims>(
            &signed_in.access_token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &Validation::new(jsonwebtoken::Algorithm::HS256),
        )
        .unwrap()
        .claims;

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(signed_in.token_type, "Bearer");
    }

    #[tokio::test]
    async fn wrong_password_is_reported_generically() {
        let mut provider = MockCredentialsProvider::new();
        provider.expect_verify().returning(|_, _| Ok(None));

        let err = SignInUseCase::new(Arc::new(provider), SECRET.to_string(), 3600)
            .sign_in(form("user@nextmail.com", "nope"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Incorrect email or password.");
        assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn provider_failure_is_unexpected() {
        let mut provider = MockCredentialsProvider::new();
        provider
            .expect_verify()
            .returning(|_, _| Err(anyhow!("connection reset")));

        let err = SignInUseCase::new(Arc::new(provider), SECRET.to_string(), 3600)
            .sign_in(form("user@nextmail.com", "123456"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Unexpected auth error.");
    }

    #[tokio::test]
    async fn blank_credentials_skip_the_provider() {
        let mut provider = MockCredentialsProvider::new();
        provider.expect_verify().never();

        let err = SignInUseCase::new(Arc::new(provider), SECRET.to_string(), 3600)
            .sign_in(form("", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, SignInError::InvalidCredentials));
    }
}
