use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use uuid::Uuid;

use crate::{
    application::usecases::{
        dashboard_cards::DashboardCardsUseCase, errors::MutationOutcome, invoices::InvoicesUseCase,
    },
    domain::{
        repositories::{
            customers::CustomerRepository, invoices::InvoiceRepository,
            revalidation::PathRevalidator, reviews::ReviewRepository,
        },
        value_objects::{invoices::InvoiceForm, pagination::ListFilter},
    },
    infrastructure::{
        axum_http::{auth::AuthUser, error_responses::AppError},
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{
                customers::CustomerPostgres, invoices::InvoicePostgres, reviews::ReviewPostgres,
            },
        },
        revalidation::BroadcastRevalidator,
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>, revalidator: Arc<BroadcastRevalidator>) -> Router {
    let invoice_repository = Arc::new(InvoicePostgres::new(Arc::clone(&db_pool)));
    let invoices_usecase = InvoicesUseCase::new(Arc::clone(&invoice_repository), revalidator);
    let cards_usecase = DashboardCardsUseCase::new(
        Arc::new(ReviewPostgres::new(Arc::clone(&db_pool))),
        invoice_repository,
        Arc::new(CustomerPostgres::new(Arc::clone(&db_pool))),
    );

    let cards_router = Router::new()
        .route(
            "/cards",
            get(cards::<ReviewPostgres, InvoicePostgres, CustomerPostgres>),
        )
        .with_state(Arc::new(cards_usecase));

    Router::new()
        .route(
            "/",
            get(list::<InvoicePostgres, BroadcastRevalidator>)
                .post(create::<InvoicePostgres, BroadcastRevalidator>),
        )
        .route(
            "/latest",
            get(latest::<InvoicePostgres, BroadcastRevalidator>),
        )
        .route(
            "/:id",
            get(find::<InvoicePostgres, BroadcastRevalidator>)
                .post(update::<InvoicePostgres, BroadcastRevalidator>)
                .delete(remove::<InvoicePostgres, BroadcastRevalidator>),
        )
        .with_state(Arc::new(invoices_usecase))
        .merge(cards_router)
}

pub(crate) fn outcome_response(outcome: MutationOutcome) -> Response {
    match outcome {
        MutationOutcome::Redirect { to } => Redirect::to(to).into_response(),
        MutationOutcome::Message { message } => {
            Json(serde_json::json!({ "message": message })).into_response()
        }
    }
}

pub async fn list<I, V>(
    State(invoices_usecase): State<Arc<InvoicesUseCase<I, V>>>,
    _auth: AuthUser,
    Query(filter): Query<ListFilter>,
) -> Result<impl IntoResponse, AppError>
where
    I: InvoiceRepository + Send + Sync + 'static,
    V: PathRevalidator + Send + Sync + 'static,
{
    let page = invoices_usecase.list_page(&filter).await?;
    Ok(Json(page))
}

pub async fn latest<I, V>(
    State(invoices_usecase): State<Arc<InvoicesUseCase<I, V>>>,
    _auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    I: InvoiceRepository + Send + Sync + 'static,
    V: PathRevalidator + Send + Sync + 'static,
{
    Ok(Json(invoices_usecase.list_latest().await?))
}

pub async fn find<I, V>(
    State(invoices_usecase): State<Arc<InvoicesUseCase<I, V>>>,
    _auth: AuthUser,
    Path(invoice_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    I: InvoiceRepository + Send + Sync + 'static,
    V: PathRevalidator + Send + Sync + 'static,
{
    Ok(Json(invoices_usecase.get_invoice(invoice_id).await?))
}

pub async fn create<I, V>(
    State(invoices_usecase): State<Arc<InvoicesUseCase<I, V>>>,
    _auth: AuthUser,
    Form(form): Form<InvoiceForm>,
) -> Result<Response, AppError>
where
    I: InvoiceRepository + Send + Sync + 'static,
    V: PathRevalidator + Send + Sync + 'static,
{
    let outcome = invoices_usecase.create_invoice(form).await?;
    Ok(outcome_response(outcome))
}

pub async fn update<I, V>(
    State(invoices_usecase): State<Arc<InvoicesUseCase<I, V>>>,
    _auth: AuthUser,
    Path(invoice_id): Path<Uuid>,
    Form(form): Form<InvoiceForm>,
) -> Result<Response, AppError>
where
    I: InvoiceRepository + Send + Sync + 'static,
    V: PathRevalidator + Send + Sync + 'static,
{
    let outcome = invoices_usecase.update_invoice(invoice_id, form).await?;
    Ok(outcome_response(outcome))
}

pub async fn remove<I, V>(
    State(invoices_usecase): State<Arc<InvoicesUseCase<I, V>>>,
    _auth: AuthUser,
    Path(invoice_id): Path<Uuid>,
) -> Result<Response, AppError>
where
    I: InvoiceRepository + Send + Sync + 'static,
    V: PathRevalidator + Send + Sync + 'static,
{
    let outcome = invoices_usecase.delete_invoice(invoice_id).await?;
    Ok(outcome_response(outcome))
}

pub async fn cards<R, I, C>(
    State(cards_usecase): State<Arc<DashboardCardsUseCase<R, I, C>>>,
    _auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    R: ReviewRepository + Send + Sync + 'static,
    I: InvoiceRepository + Send + Sync + 'static,
    C: CustomerRepository + Send + Sync + 'static,
{
    Ok(Json(cards_usecase.invoice_cards().await?))
}
