//! Listing browse and submission use-case ports.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use pagination::{PageParams, Pagination};
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::house::{House, HouseFilter, HousePage, HouseStatus, HouseUpdate, NewHouse};
use crate::domain::picture::Picture;
use crate::domain::ports::image_host::ImageUpload;
use crate::domain::user::UserId;

/// Message returned when a listing does not exist.
pub const HOUSE_NOT_FOUND: &str = "House not found";

/// Message returned when editing a listing the caller does not own.
pub const EDIT_FORBIDDEN: &str = "Forbidden - You can only edit your own houses";

/// Message returned when deleting a listing the caller does not own.
pub const DELETE_FORBIDDEN: &str = "Forbidden - You can only delete your own houses";

/// Message returned when a submitted zpid is already in use.
pub const DUPLICATE_ZPID: &str =
    "A house with this ZPID already exists. Please use a different ZPID or leave it empty.";

/// Read-side port for browsing listings.
#[async_trait]
pub trait HousesQuery: Send + Sync {
    /// One page of listings matching `filter`, newest first.
    async fn list(&self, filter: &HouseFilter, page: PageParams) -> Result<HousePage, Error>;

    /// A single listing with its gallery.
    async fn get(&self, id: Uuid) -> Result<House, Error>;

    /// Listings submitted by `owner`, optionally narrowed by a search term.
    async fn list_owned(&self, owner: UserId, search: Option<&str>) -> Result<Vec<House>, Error>;
}

/// Write-side port for submitting and managing listings.
#[async_trait]
pub trait HousesCommand: Send + Sync {
    /// Create a listing owned by `owner`, uploading `images` to the host.
    async fn create(
        &self,
        owner: UserId,
        house: NewHouse,
        images: Vec<ImageUpload>,
    ) -> Result<House, Error>;

    /// Apply a partial update to a listing the caller owns.
    async fn update(
        &self,
        owner: UserId,
        id: Uuid,
        changes: HouseUpdate,
    ) -> Result<House, Error>;

    /// Delete a listing the caller owns.
    async fn delete(&self, owner: UserId, id: Uuid) -> Result<(), Error>;
}

/// In-memory listings used when no database is configured.
///
/// One shared instance implements both the query and command ports so demo
/// submissions show up in subsequent browses.
#[derive(Debug, Clone)]
pub struct FixtureHouses {
    state: Arc<Mutex<Vec<House>>>,
}

impl Default for FixtureHouses {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(demo_houses())),
        }
    }
}

impl FixtureHouses {
    /// A fixture starting from the given listings instead of the demo set.
    #[must_use]
    pub fn with_houses(houses: Vec<House>) -> Self {
        Self {
            state: Arc::new(Mutex::new(houses)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<House>>, Error> {
        self.state
            .lock()
            .map_err(|_| Error::internal("fixture listing state poisoned"))
    }
}

fn matches_filter(house: &House, filter: &HouseFilter) -> bool {
    if let Some(search) = &filter.search {
        let needle = search.to_lowercase();
        let haystacks = [
            &house.street_address,
            &house.city,
            &house.state,
            &house.zipcode,
            &house.home_type,
        ];
        if !haystacks
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
        {
            return false;
        }
    }
    if filter.status.is_some_and(|status| status != house.status) {
        return false;
    }
    if filter.min_price.is_some_and(|min| house.price < min) {
        return false;
    }
    if filter.max_price.is_some_and(|max| house.price > max) {
        return false;
    }
    if filter.bedrooms.is_some_and(|count| count != house.bedrooms) {
        return false;
    }
    if filter
        .bathrooms
        .is_some_and(|count| count != house.bathrooms)
    {
        return false;
    }
    if filter.exclude.is_some_and(|id| id == house.id) {
        return false;
    }
    true
}

fn apply_update(house: &mut House, changes: HouseUpdate) {
    if changes.zpid.is_some() {
        house.zpid = changes.zpid;
    }
    if let Some(value) = changes.street_address {
        house.street_address = value;
    }
    if let Some(value) = changes.city {
        house.city = value;
    }
    if let Some(value) = changes.state {
        house.state = value;
    }
    if let Some(value) = changes.zipcode {
        house.zipcode = value;
    }
    if changes.neighborhood.is_some() {
        house.neighborhood = changes.neighborhood;
    }
    if changes.community.is_some() {
        house.community = changes.community;
    }
    if changes.subdivision.is_some() {
        house.subdivision = changes.subdivision;
    }
    if let Some(value) = changes.bedrooms {
        house.bedrooms = value;
    }
    if let Some(value) = changes.bathrooms {
        house.bathrooms = value;
    }
    if let Some(value) = changes.price {
        house.price = value;
    }
    if let Some(value) = changes.year_built {
        house.year_built = value;
    }
    if let Some(value) = changes.longitude {
        house.longitude = value;
    }
    if let Some(value) = changes.latitude {
        house.latitude = value;
    }
    if let Some(value) = changes.status {
        house.status = value;
    }
    if let Some(value) = changes.home_type {
        house.home_type = value;
    }
    if let Some(value) = changes.description {
        house.description = value;
    }
    if let Some(value) = changes.living_area {
        house.living_area = value;
    }
    if let Some(value) = changes.currency {
        house.currency = value;
    }
    if let Some(value) = changes.date_posted {
        house.date_posted = value;
    }
    house.updated_at = Utc::now();
}

#[async_trait]
impl HousesQuery for FixtureHouses {
    async fn list(&self, filter: &HouseFilter, page: PageParams) -> Result<HousePage, Error> {
        let state = self.lock()?;
        let matching: Vec<&House> = state
            .iter()
            .filter(|house| matches_filter(house, filter))
            .collect();
        let total = u64::try_from(matching.len()).unwrap_or(u64::MAX);
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        let houses = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok(HousePage {
            houses,
            pagination: Pagination::for_page(page, total),
        })
    }

    async fn get(&self, id: Uuid) -> Result<House, Error> {
        let state = self.lock()?;
        state
            .iter()
            .find(|house| house.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(HOUSE_NOT_FOUND))
    }

    async fn list_owned(&self, owner: UserId, search: Option<&str>) -> Result<Vec<House>, Error> {
        let filter = HouseFilter {
            search: search.map(str::to_owned),
            ..HouseFilter::default()
        };
        let state = self.lock()?;
        Ok(state
            .iter()
            .filter(|house| house.owner_id == Some(owner.as_uuid()))
            .filter(|house| matches_filter(house, &filter))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl HousesCommand for FixtureHouses {
    async fn create(
        &self,
        owner: UserId,
        house: NewHouse,
        images: Vec<ImageUpload>,
    ) -> Result<House, Error> {
        let mut state = self.lock()?;
        if house.zpid.is_some() && state.iter().any(|existing| existing.zpid == house.zpid) {
            return Err(Error::invalid_request(DUPLICATE_ZPID));
        }
        let id = Uuid::new_v4();
        let now = Utc::now();
        let pictures = images
            .iter()
            .enumerate()
            .map(|(index, image)| {
                let name = image.file_name.as_deref().unwrap_or("image");
                Picture {
                    id: Uuid::new_v4(),
                    house_id: id,
                    url: format!("https://images.invalid/fixture/{name}"),
                    alt_text: Some(format!("{} - Photo {}", house.street_address, index + 1)),
                    is_primary: index == 0,
                    position: i32::try_from(index).unwrap_or(i32::MAX),
                }
            })
            .collect();
        let created = House {
            id,
            zpid: house.zpid,
            street_address: house.street_address,
            city: house.city,
            state: house.state,
            zipcode: house.zipcode,
            neighborhood: house.neighborhood,
            community: house.community,
            subdivision: house.subdivision,
            bedrooms: house.bedrooms,
            bathrooms: house.bathrooms,
            price: house.price,
            year_built: house.year_built,
            longitude: house.longitude,
            latitude: house.latitude,
            status: house.status,
            home_type: house.home_type,
            description: house.description,
            living_area: house.living_area,
            currency: house.currency,
            date_posted: house
                .date_posted
                .unwrap_or_else(|| now.date_naive().to_string()),
            owner_id: Some(owner.as_uuid()),
            created_at: now,
            updated_at: now,
            pictures,
        };
        state.insert(0, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        owner: UserId,
        id: Uuid,
        changes: HouseUpdate,
    ) -> Result<House, Error> {
        let mut state = self.lock()?;
        let house = state
            .iter_mut()
            .find(|house| house.id == id)
            .ok_or_else(|| Error::not_found(HOUSE_NOT_FOUND))?;
        if house.owner_id != Some(owner.as_uuid()) {
            return Err(Error::forbidden(EDIT_FORBIDDEN));
        }
        apply_update(house, changes);
        Ok(house.clone())
    }

    async fn delete(&self, owner: UserId, id: Uuid) -> Result<(), Error> {
        let mut state = self.lock()?;
        let position = state
            .iter()
            .position(|house| house.id == id)
            .ok_or_else(|| Error::not_found(HOUSE_NOT_FOUND))?;
        let owned = state
            .get(position)
            .is_some_and(|house| house.owner_id == Some(owner.as_uuid()));
        if !owned {
            return Err(Error::forbidden(DELETE_FORBIDDEN));
        }
        state.remove(position);
        Ok(())
    }
}

/// Two stable demo listings for database-less deployments.
fn demo_houses() -> Vec<House> {
    let first_id = Uuid::from_u128(0x11);
    let second_id = Uuid::from_u128(0x22);
    let posted = Utc::now();
    vec![
        House {
            id: first_id,
            zpid: Some(1),
            street_address: "482 Oak Ave".to_owned(),
            city: "Chicago".to_owned(),
            state: "IL".to_owned(),
            zipcode: "60601".to_owned(),
            neighborhood: None,
            community: None,
            subdivision: None,
            bedrooms: 3,
            bathrooms: 2,
            price: 425_000.0,
            year_built: 1998,
            longitude: -87.6298,
            latitude: 41.8781,
            status: HouseStatus::ForSale,
            home_type: "Single Family".to_owned(),
            description: "Beautiful single family with 3 bedrooms and 2 bathrooms.".to_owned(),
            living_area: 2100,
            currency: "USD".to_owned(),
            date_posted: posted.date_naive().to_string(),
            owner_id: None,
            created_at: posted,
            updated_at: posted,
            pictures: vec![Picture {
                id: Uuid::from_u128(0x111),
                house_id: first_id,
                url: "https://picsum.photos/seed/house-1/1080/720".to_owned(),
                alt_text: Some("482 Oak Ave - Photo 1".to_owned()),
                is_primary: true,
                position: 0,
            }],
        },
        House {
            id: second_id,
            zpid: Some(2),
            street_address: "17 Cedar Ln".to_owned(),
            city: "San Diego".to_owned(),
            state: "CA".to_owned(),
            zipcode: "92101".to_owned(),
            neighborhood: None,
            community: None,
            subdivision: None,
            bedrooms: 2,
            bathrooms: 1,
            price: 2450.0,
            year_built: 2010,
            longitude: -117.1611,
            latitude: 32.7157,
            status: HouseStatus::ForRent,
            home_type: "Apartment".to_owned(),
            description: "Beautiful apartment with 2 bedrooms and 1 bathrooms.".to_owned(),
            living_area: 950,
            currency: "USD".to_owned(),
            date_posted: posted.date_naive().to_string(),
            owner_id: None,
            created_at: posted,
            updated_at: posted,
            pictures: vec![Picture {
                id: Uuid::from_u128(0x222),
                house_id: second_id,
                url: "https://picsum.photos/seed/house-2/1080/720".to_owned(),
                alt_text: Some("17 Cedar Ln - Photo 1".to_owned()),
                is_primary: true,
                position: 0,
            }],
        },
    ]
}
