use std::sync::Arc;

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};

use crate::{
    application::usecases::sign_in::SignInUseCase,
    config::config_model::Auth,
    domain::{repositories::credentials::CredentialsProvider, value_objects::auth::SignInForm},
    infrastructure::{
        axum_http::error_responses::AppError,
        postgres::{
            postgres_connection::PgPoolSquad, repositories::credentials::UserCredentialsPostgres,
        },
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>, auth: &Auth) -> Router {
    let credentials_provider = UserCredentialsPostgres::new(Arc::clone(&db_pool));
    let sign_in_usecase = SignInUseCase::new(
        Arc::new(credentials_provider),
        auth.jwt_secret.clone(),
        auth.token_ttl_seconds,
    );

    Router::new()
        .route("/sign-in", post(sign_in::<UserCredentialsPostgres>))
        .with_state(Arc::new(sign_in_usecase))
}

pub async fn sign_in<P>(
    State(sign_in_usecase): State<Arc<SignInUseCase<P>>>,
    Json(form): Json<SignInForm>,
) -> Result<impl IntoResponse, AppError>
where
    P: CredentialsProvider + Send + Sync + 'static,
{
    Ok(Json(sign_in_usecase.sign_in(form).await?))
}
