use anyhow::{Result, anyhow};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use async_trait::async_trait;
use diesel::{OptionalExtension, RunQueryDsl, prelude::*};
use std::sync::Arc;
use tracing::warn;

use crate::{
    domain::{
        entities::users::UserEntity,
        repositories::credentials::{AuthenticatedUser, CredentialsProvider},
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::users},
};

pub struct UserCredentialsPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl UserCredentialsPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CredentialsProvider for UserCredentialsPostgres {
    async fn verify(&self, email: &str, password: &str) -> Result<Option<AuthenticatedUser>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let user = users::table
            .filter(users::email.eq(email))
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()?;

        let Some(user) = user else {
            return Ok(None);
        };

        let parsed_hash = PasswordHash::new(&user.password)
            .map_err(|err| anyhow!("stored password hash is malformed: {err}"))?;

        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_err()
        {
            warn!(user_id = %user.id, "credentials: password mismatch");
            return Ok(None);
        }

        Ok(Some(AuthenticatedUser {
            id: user.id,
            name: user.name,
            email: user.email,
        }))
    }
}
