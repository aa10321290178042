use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;

use crate::{
    application::usecases::customers::CustomersUseCase,
    domain::repositories::customers::CustomerRepository,
    infrastructure::{
        axum_http::{auth::AuthUser, error_responses::AppError},
        postgres::{
            postgres_connection::PgPoolSquad, repositories::customers::CustomerPostgres,
        },
    },
};

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let customer_repository = CustomerPostgres::new(Arc::clone(&db_pool));
    let customers_usecase = CustomersUseCase::new(Arc::new(customer_repository));

    Router::new()
        .route("/", get(list::<CustomerPostgres>))
        .route("/search", get(search::<CustomerPostgres>))
        .with_state(Arc::new(customers_usecase))
}

pub async fn list<C>(
    State(customers_usecase): State<Arc<CustomersUseCase<C>>>,
    _auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    C: CustomerRepository + Send + Sync + 'static,
{
    Ok(Json(customers_usecase.list_customers().await?))
}

pub async fn search<C>(
    State(customers_usecase): State<Arc<CustomersUseCase<C>>>,
    _auth: AuthUser,
    Query(search_query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError>
where
    C: CustomerRepository + Send + Sync + 'static,
{
    Ok(Json(
        customers_usecase.list_filtered(&search_query.query).await?,
    ))
}
