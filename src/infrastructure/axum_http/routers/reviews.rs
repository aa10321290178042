use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    application::usecases::{dashboard_cards::DashboardCardsUseCase, reviews::ReviewsUseCase},
    domain::{
        repositories::{
            customers::CustomerRepository, file_store::FileStore, images::ImageRepository,
            invoices::InvoiceRepository, revalidation::PathRevalidator, reviews::ReviewRepository,
        },
        value_objects::{
            image_owner::ImageOwner,
            pagination::{IMAGES_LIMIT, ListFilter},
            reviews::ReviewForm,
            uploads::ImageUpload,
        },
    },
    infrastructure::{
        axum_http::{
            auth::AuthUser, error_responses::AppError, routers::invoices::outcome_response,
        },
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{
                customers::CustomerPostgres, images::ImagePostgres, invoices::InvoicePostgres,
                reviews::ReviewPostgres,
            },
        },
        revalidation::BroadcastRevalidator,
        storage::local_disk::LocalDiskStore,
    },
};

type Reviews = ReviewsUseCase<
    ReviewPostgres,
    ImagePostgres,
    CustomerPostgres,
    LocalDiskStore,
    BroadcastRevalidator,
>;

pub fn routes(
    db_pool: Arc<PgPoolSquad>,
    file_store: Arc<LocalDiskStore>,
    revalidator: Arc<BroadcastRevalidator>,
) -> Router {
    let review_repository = Arc::new(ReviewPostgres::new(Arc::clone(&db_pool)));
    let customer_repository = Arc::new(CustomerPostgres::new(Arc::clone(&db_pool)));

    let reviews_usecase: Reviews = ReviewsUseCase::new(
        Arc::clone(&review_repository),
        Arc::new(ImagePostgres::new(Arc::clone(&db_pool))),
        Arc::clone(&customer_repository),
        file_store,
        revalidator,
    );
    let cards_usecase = DashboardCardsUseCase::new(
        review_repository,
        Arc::new(InvoicePostgres::new(Arc::clone(&db_pool))),
        customer_repository,
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
            get(list::<ReviewPostgres, ImagePostgres, CustomerPostgres, LocalDiskStore, BroadcastRevalidator>)
                .post(create::<ReviewPostgres, ImagePostgres, CustomerPostgres, LocalDiskStore, BroadcastRevalidator>),
        )
        .route(
            "/:id",
            get(find::<ReviewPostgres, ImagePostgres, CustomerPostgres, LocalDiskStore, BroadcastRevalidator>)
                .post(update::<ReviewPostgres, ImagePostgres, CustomerPostgres, LocalDiskStore, BroadcastRevalidator>)
                .delete(remove::<ReviewPostgres, ImagePostgres, CustomerPostgres, LocalDiskStore, BroadcastRevalidator>),
        )
        .route(
            "/:id/images",
            get(images::<ReviewPostgres, ImagePostgres, CustomerPostgres, LocalDiskStore, BroadcastRevalidator>),
        )
        .with_state(Arc::new(reviews_usecase))
        // Uploads are bounded by the server-wide RequestBodyLimitLayer instead.
        .layer(DefaultBodyLimit::disable())
        .merge(cards_router)
}

#[derive(Debug, Deserialize)]
pub struct ImagesQuery {
    pub limit: Option<i64>,
}

async fn read_review_multipart(
    mut multipart: Multipart,
) -> Result<(ReviewForm, Option<ImageUpload>), AppError> {
    let mut form = ReviewForm::default();
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(err.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|err| AppError::BadRequest(err.body_text()))?;
            upload = Some(ImageUpload {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|err| AppError::BadRequest(err.body_text()))?;
        match name.as_str() {
            "customerId" => form.customer_id = value,
            "title" => form.title = value,
            "status" => form.status = value,
            "text" => form.text = value,
            _ => {}
        }
    }

    Ok((form, upload))
}

pub async fn list<R, Img, C, F, V>(
    State(reviews_usecase): State<Arc<ReviewsUseCase<R, Img, C, F, V>>>,
    _auth: AuthUser,
    Query(filter): Query<ListFilter>,
) -> Result<impl IntoResponse, AppError>
where
    R: ReviewRepository + Send + Sync + 'static,
    Img: ImageRepository + Send + Sync + 'static,
    C: CustomerRepository + Send + Sync + 'static,
    F: FileStore + Send + Sync + 'static,
    V: PathRevalidator + Send + Sync + 'static,
{
    Ok(Json(reviews_usecase.list_page(&filter).await?))
}

pub async fn find<R, Img, C, F, V>(
    State(reviews_usecase): State<Arc<ReviewsUseCase<R, Img, C, F, V>>>,
    _auth: AuthUser,
    Path(review_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    R: ReviewRepository + Send + Sync + 'static,
    Img: ImageRepository + Send + Sync + 'static,
    C: CustomerRepository + Send + Sync + 'static,
    F: FileStore + Send + Sync + 'static,
    V: PathRevalidator + Send + Sync + 'static,
{
    Ok(Json(reviews_usecase.edit_view(review_id).await?))
}

pub async fn images<R, Img, C, F, V>(
    State(reviews_usecase): State<Arc<ReviewsUseCase<R, Img, C, F, V>>>,
    _auth: AuthUser,
    Path(review_id): Path<Uuid>,
    Query(query): Query<ImagesQuery>,
) -> Result<impl IntoResponse, AppError>
where
    R: ReviewRepository + Send + Sync + 'static,
    Img: ImageRepository + Send + Sync + 'static,
    C: CustomerRepository + Send + Sync + 'static,
    F: FileStore + Send + Sync + 'static,
    V: PathRevalidator + Send + Sync + 'static,
{
    let limit = query.limit.unwrap_or(IMAGES_LIMIT);
    Ok(Json(
        reviews_usecase
            .list_images(ImageOwner::Review(review_id), limit)
            .await?,
    ))
}

pub async fn create<R, Img, C, F, V>(
    State(reviews_usecase): State<Arc<ReviewsUseCase<R, Img, C, F, V>>>,
    _auth: AuthUser,
    multipart: Multipart,
) -> Result<Response, AppError>
where
    R: ReviewRepository + Send + Sync + 'static,
    Img: ImageRepository + Send + Sync + 'static,
    C: CustomerRepository + Send + Sync + 'static,
    F: FileStore + Send + Sync + 'static,
    V: PathRevalidator + Send + Sync + 'static,
{
    let (form, upload) = read_review_multipart(multipart).await?;
    let outcome = reviews_usecase.create_review(form, upload).await?;
    Ok(outcome_response(outcome))
}

pub async fn update<R, Img, C, F, V>(
    State(reviews_usecase): State<Arc<ReviewsUseCase<R, Img, C, F, V>>>,
    _auth: AuthUser,
    Path(review_id): Path<Uuid>,
    Form(form): Form<ReviewForm>,
) -> Result<Response, AppError>
where
    R: ReviewRepository + Send + Sync + 'static,
    Img: ImageRepository + Send + Sync + 'static,
    C: CustomerRepository + Send + Sync + 'static,
    F: FileStore + Send + Sync + 'static,
    V: PathRevalidator + Send + Sync + 'static,
{
    let outcome = reviews_usecase.update_review(review_id, form).await?;
    Ok(outcome_response(outcome))
}

pub async fn remove<R, Img, C, F, V>(
    State(reviews_usecase): State<Arc<ReviewsUseCase<R, Img, C, F, V>>>,
    _auth: AuthUser,
    Path(review_id): Path<Uuid>,
) -> Result<Response, AppError>
where
    R: ReviewRepository + Send + Sync + 'static,
    Img: ImageRepository + Send + Sync + 'static,
    C: CustomerRepository + Send + Sync + 'static,
    F: FileStore + Send + Sync + 'static,
    V: PathRevalidator + Send + Sync + 'static,
{
    let outcome = reviews_usecase.delete_review(review_id).await?;
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
    Ok(Json(cards_usecase.review_cards().await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Extension,
        body::Body,
        http::{Request, StatusCode, header},
        routing::post,
    };
    use jsonwebtoken::{EncodingKey, Header, encode};
    use tower::ServiceExt;

    use crate::{
        domain::{
            repositories::{
                customers::MockCustomerRepository, file_store::MockFileStore,
                images::MockImageRepository, revalidation::MockPathRevalidator,
                reviews::MockReviewRepository,
            },
            value_objects::{auth::SessionClaims, reviews::REVIEWS_PATH},
        },
        infrastructure::axum_http::auth::JwtKeys,
    };

    const SECRET: &str = "routersecretforunittesting";
    const BOUNDARY: &str = "review-form-boundary";

    fn bearer() -> String {
        let claims = SessionClaims {
            sub: Uuid::new_v4().to_string(),
            email: "user@nextmail.com".to_string(),
            name: "User".to_string(),
            iat: 1,
            exp: 9999999999,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        format!("Bearer {token}")
    }

    fn multipart_body(fields: &[(&str, &str)]) -> String {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"\"\r\nContent-Type: application/octet-stream\r\n\r\n\r\n"
        ));
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    #[tokio::test]
    async fn multipart_create_redirects_and_skips_empty_file() {
        let customer_id = Uuid::new_v4();
        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_create_review_with_image()
            .withf(move |review, url| {
                review.customer_id == customer_id && review.title == "Great ride" && url.is_none()
            })
            .times(1)
            .returning(|_, _| Ok(Uuid::new_v4()));
        let mut files = MockFileStore::new();
        files.expect_root_exists().never();
        let mut revalidator = MockPathRevalidator::new();
        revalidator.expect_revalidate().return_const(());

        let usecase = ReviewsUseCase::new(
            Arc::new(reviews),
            Arc::new(MockImageRepository::new()),
            Arc::new(MockCustomerRepository::new()),
            Arc::new(files),
            Arc::new(revalidator),
        );
        let app = Router::new()
            .route(
                "/",
                post(
                    create::<
                        MockReviewRepository,
                        MockImageRepository,
                        MockCustomerRepository,
                        MockFileStore,
                        MockPathRevalidator,
                    >,
                ),
            )
            .with_state(Arc::new(usecase))
            .layer(Extension(Arc::new(JwtKeys::new(SECRET))));

        let customer = customer_id.to_string();
        let body = multipart_body(&[
            ("customerId", customer.as_str()),
            ("title", "Great ride"),
            ("status", "pending"),
            ("text", "Smooth trip"),
        ]);
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::AUTHORIZATION, bearer())
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], REVIEWS_PATH);
    }
}
