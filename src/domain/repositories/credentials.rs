use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// External credential check. `Ok(None)` means the credentials were wrong.
#[automock]
#[async_trait]
pub trait CredentialsProvider {
    async fn verify(&self, email: &str, password: &str) -> Result<Option<AuthenticatedUser>>;
}
