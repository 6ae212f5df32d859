//! Listing browse and submission service.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageParams, Pagination};
use tracing::{error, warn};
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::house::{House, HouseFilter, HousePage, HouseUpdate, NewHouse};
use crate::domain::picture::NewPicture;
use crate::domain::ports::{
    DELETE_FORBIDDEN, DUPLICATE_ZPID, EDIT_FORBIDDEN, HOUSE_NOT_FOUND, HousePersistenceError,
    HouseRepository, HousesCommand, HousesQuery, ImageHost, ImageUpload,
};
use crate::domain::user::UserId;

/// [`HousesQuery`] and [`HousesCommand`] over a [`HouseRepository`] and an
/// [`ImageHost`].
pub struct ListingService {
    houses: Arc<dyn HouseRepository>,
    images: Arc<dyn ImageHost>,
}

impl ListingService {
    /// Build the service over its storage and image ports.
    pub fn new(houses: Arc<dyn HouseRepository>, images: Arc<dyn ImageHost>) -> Self {
        Self { houses, images }
    }

    /// Upload submitted images sequentially, skipping failures.
    ///
    /// Position and alt text follow the submission order even when an
    /// earlier upload failed; the first picture that does make it becomes
    /// primary.
    async fn upload_pictures(
        &self,
        street_address: &str,
        images: &[ImageUpload],
    ) -> Vec<NewPicture> {
        let mut pictures = Vec::with_capacity(images.len());
        for (index, image) in images.iter().enumerate() {
            match self.images.upload(image).await {
                Ok(url) => pictures.push(NewPicture {
                    url,
                    alt_text: Some(format!("{street_address} - Photo {}", index + 1)),
                    is_primary: pictures.is_empty(),
                    position: i32::try_from(index).unwrap_or(i32::MAX),
                }),
                Err(upload_error) => {
                    warn!(
                        %upload_error,
                        file_name = image.file_name.as_deref().unwrap_or("<unnamed>"),
                        "image upload failed; listing continues without this picture"
                    );
                }
            }
        }
        pictures
    }
}

fn map_house_error(error: HousePersistenceError) -> Error {
    match error {
        HousePersistenceError::Connection { message } => {
            error!(%message, "house storage unavailable");
            Error::service_unavailable("house storage unavailable")
        }
        HousePersistenceError::Query { message } => {
            error!(%message, "house storage query failed");
            Error::internal("house storage query failed")
        }
        HousePersistenceError::DuplicateZpid { .. } => Error::invalid_request(DUPLICATE_ZPID),
    }
}

#[async_trait]
impl HousesQuery for ListingService {
    async fn list(&self, filter: &HouseFilter, page: PageParams) -> Result<HousePage, Error> {
        let limit = i64::try_from(page.limit()).unwrap_or(i64::MAX);
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
        let (houses, total) = self
            .houses
            .search(filter, limit, offset)
            .await
            .map_err(map_house_error)?;
        Ok(HousePage {
            houses,
            pagination: Pagination::for_page(page, total),
        })
    }

    async fn get(&self, id: Uuid) -> Result<House, Error> {
        self.houses
            .find_by_id(id)
            .await
            .map_err(map_house_error)?
            .ok_or_else(|| Error::not_found(HOUSE_NOT_FOUND))
    }

    async fn list_owned(&self, owner: UserId, search: Option<&str>) -> Result<Vec<House>, Error> {
        self.houses
            .list_by_owner(owner.as_uuid(), search)
            .await
            .map_err(map_house_error)
    }
}

#[async_trait]
impl HousesCommand for ListingService {
    async fn create(
        &self,
        owner: UserId,
        house: NewHouse,
        images: Vec<ImageUpload>,
    ) -> Result<House, Error> {
        let pictures = self.upload_pictures(&house.street_address, &images).await;
        self.houses
            .insert(owner.as_uuid(), house, pictures)
            .await
            .map_err(map_house_error)
    }

    async fn update(
        &self,
        owner: UserId,
        id: Uuid,
        changes: HouseUpdate,
    ) -> Result<House, Error> {
        let existing = self
            .houses
            .find_by_id(id)
            .await
            .map_err(map_house_error)?
            .ok_or_else(|| Error::not_found(HOUSE_NOT_FOUND))?;
        if existing.owner_id != Some(owner.as_uuid()) {
            return Err(Error::forbidden(EDIT_FORBIDDEN));
        }
        if changes.is_empty() {
            return Ok(existing);
        }
        self.houses
            .update(id, changes)
            .await
            .map_err(map_house_error)
    }

    async fn delete(&self, owner: UserId, id: Uuid) -> Result<(), Error> {
        let existing = self
            .houses
            .find_by_id(id)
            .await
            .map_err(map_house_error)?
            .ok_or_else(|| Error::not_found(HOUSE_NOT_FOUND))?;
        if existing.owner_id != Some(owner.as_uuid()) {
            return Err(Error::forbidden(DELETE_FORBIDDEN));
        }
        self.houses.delete(id).await.map_err(map_house_error)
    }
}
