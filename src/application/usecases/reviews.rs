use std::sync::Arc;

use anyhow::{Result, anyhow};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    application::usecases::errors::{DashboardError, DashboardResult, MutationOutcome},
    domain::{
        entities::reviews::{InsertReviewEntity, UpdateReviewEntity},
        repositories::{
            customers::CustomerRepository, file_store::FileStore, images::ImageRepository,
            revalidation::PathRevalidator, reviews::ReviewRepository,
        },
        value_objects::{
            customers::CustomerFieldDto,
            image_owner::ImageOwner,
            pagination::{self, IMAGES_LIMIT, ListFilter, Page},
            reviews::{ImageDto, REVIEWS_PATH, ReviewDetailDto, ReviewForm, ReviewTableDto},
            uploads::{ImageUpload, normalize_image},
        },
    },
};

/// Everything the review edit form needs in one response.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReviewEditView {
    pub review: ReviewDetailDto,
    pub images: Vec<ImageDto>,
    pub customers: Vec<CustomerFieldDto>,
}

pub struct ReviewsUseCase<R, Img, C, F, V>
where
    R: ReviewRepository + Send + Sync + 'static,
    Img: ImageRepository + Send + Sync + 'static,
    C: CustomerRepository + Send + Sync + 'static,
    F: FileStore + Send + Sync + 'static,
    V: PathRevalidator + Send + Sync + 'static,
{
    review_repository: Arc<R>,
    image_repository: Arc<Img>,
    customer_repository: Arc<C>,
    file_store: Arc<F>,
    revalidator: Arc<V>,
}

impl<R, Img, C, F, V> ReviewsUseCase<R, Img, C, F, V>
where
    R: ReviewRepository + Send + Sync + 'static,
    Img: ImageRepository + Send + Sync + 'static,
    C: CustomerRepository + Send + Sync + 'static,
    F: FileStore + Send + Sync + 'static,
    V: PathRevalidator + Send + Sync + 'static,
{
    pub fn new(
        review_repository: Arc<R>,
        image_repository: Arc<Img>,
        customer_repository: Arc<C>,
        file_store: Arc<F>,
        revalidator: Arc<V>,
    ) -> Self {
        Self {
            review_repository,
            image_repository,
            customer_repository,
            file_store,
            revalidator,
        }
    }

    pub async fn list_filtered(&self, filter: &ListFilter) -> DashboardResult<Vec<ReviewTableDto>> {
        let rows = self
            .review_repository
            .list_filtered(&filter.search_pattern(), filter.limit(), filter.offset())
            .await
            .map_err(|err| {
                error!(
                    query = %filter.query,
                    page = filter.current_page(),
                    db_error = ?err,
                    "reviews: failed to list filtered reviews"
                );
                DashboardError::fetch("reviews", err)
            })?;

        Ok(rows.into_iter().map(ReviewTableDto::from).collect())
    }

    pub async fn count_pages(&self, query: &str) -> DashboardResult<i64> {
        let total = self
            .review_repository
            .count_filtered(&pagination::search_pattern(query))
            .await
            .map_err(|err| {
                error!(query, db_error = ?err, "reviews: failed to count filtered reviews");
                DashboardError::fetch("total number of reviews", err)
            })?;

        Ok(pagination::total_pages(total))
    }

    pub async fn list_page(&self, filter: &ListFilter) -> DashboardResult<Page<ReviewTableDto>> {
        let (items, total_pages) =
            tokio::try_join!(self.list_filtered(filter), self.count_pages(&filter.query))?;

        Ok(Page {
            items,
            current_page: filter.current_page(),
            total_pages,
        })
    }

    pub async fn get_review(&self, review_id: Uuid) -> DashboardResult<ReviewDetailDto> {
        let review = self
            .review_repository
            .find_by_id(review_id)
            .await
            .map_err(|err| {
                error!(%review_id, db_error = ?err, "reviews: failed to load review");
                DashboardError::fetch("review", err)
            })?;

        match review {
            Some(review) => Ok(ReviewDetailDto::from(review)),
            None => {
                warn!(%review_id, "reviews: review not found");
                Err(DashboardError::NotFound("Review"))
            }
        }
    }

    /// Images attached to `owner`, ordered by id descending. `limit` is capped at [`IMAGES_LIMIT`].
    pub async fn list_images(&self, owner: ImageOwner, limit: i64) -> DashboardResult<Vec<ImageDto>> {
        let limit = limit.clamp(0, IMAGES_LIMIT);
        let images = self
            .image_repository
            .list_for_owner(owner, limit)
            .await
            .map_err(|err| {
                error!(%owner, limit, db_error = ?err, "reviews: failed to list images");
                DashboardError::fetch("images", err)
            })?;

        Ok(images.into_iter().map(ImageDto::from).collect())
    }

    pub async fn edit_view(&self, review_id: Uuid) -> DashboardResult<ReviewEditView> {
        let customers = async {
            self.customer_repository
                .list_customers()
                .await
                .map_err(|err| {
                    error!(db_error = ?err, "reviews: failed to list authors for edit form");
                    DashboardError::fetch("all customers", err)
                })
        };

        let (review, images, customers) = tokio::try_join!(
            self.get_review(review_id),
            self.list_images(ImageOwner::Review(review_id), IMAGES_LIMIT),
            customers,
        )?;

        Ok(ReviewEditView {
            review,
            images,
            customers: customers.into_iter().map(CustomerFieldDto::from).collect(),
        })
    }

    /// The upload is stored before the form is validated. A failed upload never blocks the review.
    pub async fn create_review(
        &self,
        form: ReviewForm,
        upload: Option<ImageUpload>,
    ) -> DashboardResult<MutationOutcome> {
        let image_url = match upload.filter(|upload| !upload.is_empty()) {
            Some(upload) => self.store_upload(upload).await,
            None => None,
        };

        let valid = form.into_valid().map_err(|errors| {
            warn!(fields = ?errors.keys().collect::<Vec<_>>(), "reviews: create rejected");
            DashboardError::Validation {
                errors,
                message: "Missing Fields. Failed to Create Review.".to_string(),
            }
        })?;

        let today = Utc::now().date_naive();
        let insert_review_entity = InsertReviewEntity {
            customer_id: valid.customer_id,
            title: valid.title,
            status: valid.status.to_string(),
            created_at: today,
            updated_at: today,
            next_part_id: None,
            text: Some(valid.text),
        };

        let has_image = image_url.is_some();
        let review_id = self
            .review_repository
            .create_review_with_image(insert_review_entity, image_url)
            .await
            .map_err(|err| {
                error!(
                    customer_id = %valid.customer_id,
                    db_error = ?err,
                    "reviews: failed to create review"
                );
                DashboardError::storage("Create Review", err)
            })?;

        info!(%review_id, has_image, "reviews: review created");
        self.revalidator.revalidate(REVIEWS_PATH);

        Ok(MutationOutcome::Redirect { to: REVIEWS_PATH })
    }

    pub async fn update_review(
        &self,
        review_id: Uuid,
        form: ReviewForm,
    ) -> DashboardResult<MutationOutcome> {
        let valid = form.into_valid().map_err(|errors| {
            warn!(%review_id, fields = ?errors.keys().collect::<Vec<_>>(), "reviews: update rejected");
            DashboardError::Validation {
                errors,
                message: "Missing Fields. Failed to Update Review.".to_string(),
            }
        })?;

        let changes = UpdateReviewEntity {
            customer_id: valid.customer_id,
            title: valid.title,
            status: valid.status.to_string(),
            text: Some(valid.text),
            updated_at: Utc::now().date_naive(),
        };

        let updated = self
            .review_repository
            .update_review(review_id, changes)
            .await
            .map_err(|err| {
                error!(%review_id, db_error = ?err, "reviews: failed to update review");
                DashboardError::storage("Update Review", err)
            })?;

        info!(%review_id, updated, "reviews: review updated");
        self.revalidator.revalidate(REVIEWS_PATH);

        Ok(MutationOutcome::Redirect { to: REVIEWS_PATH })
    }

    pub async fn delete_review(&self, review_id: Uuid) -> DashboardResult<MutationOutcome> {
        let deleted = self
            .review_repository
            .delete_review(review_id)
            .await
            .map_err(|err| {
                error!(%review_id, db_error = ?err, "reviews: failed to delete review");
                DashboardError::storage("Delete Review", err)
            })?;

        info!(%review_id, deleted, "reviews: review deleted");
        self.revalidator.revalidate(REVIEWS_PATH);

        Ok(MutationOutcome::Message {
            message: "Review has been deleted.".to_string(),
        })
    }

    async fn store_upload(&self, upload: ImageUpload) -> Option<String> {
        let file_name = upload.file_name.clone();
        match self.try_store_upload(upload).await {
            Ok(url) => {
                debug!(original = %file_name, url, "reviews: upload stored");
                Some(url)
            }
            Err(err) => {
                warn!(
                    original = %file_name,
                    error = ?err,
                    "reviews: failed to store upload, creating review without image"
                );
                None
            }
        }
    }

    async fn try_store_upload(&self, upload: ImageUpload) -> Result<String> {
        if !self.file_store.root_exists().await? {
            return Err(anyhow!("upload directory does not exist"));
        }

        let normalized = tokio::task::spawn_blocking(move || normalize_image(upload)).await??;

        self.file_store
            .write_file(&normalized.file_name, normalized.bytes)
            .await
    }
}
