//! Listing storage port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::house::{House, HouseFilter, HouseUpdate, NewHouse};
use crate::domain::picture::NewPicture;
use crate::domain::ports::macros::define_port_error;

define_port_error! {
    /// Failures surfaced by [`HouseRepository`] implementations.
    HousePersistenceError {
        /// Could not obtain or keep a storage connection.
        Connection => "house storage connection failure: {message}",
        /// The storage backend rejected the operation.
        Query => "house storage query failure: {message}",
        /// Another listing already uses this zpid.
        DuplicateZpid => "zpid already in use: {message}",
    }
}

/// Port for listing persistence.
///
/// Returned [`House`] values always carry their gallery ordered by position.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HouseRepository: Send + Sync {
    /// Count matching listings and return one page, newest first.
    async fn search(
        &self,
        filter: &HouseFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<House>, u64), HousePersistenceError>;

    /// Fetch a single listing.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<House>, HousePersistenceError>;

    /// Store a new listing with its pictures.
    async fn insert(
        &self,
        owner: Uuid,
        house: NewHouse,
        pictures: Vec<NewPicture>,
    ) -> Result<House, HousePersistenceError>;

    /// Apply a partial update and return the refreshed listing.
    async fn update(
        &self,
        id: Uuid,
        changes: HouseUpdate,
    ) -> Result<House, HousePersistenceError>;

    /// Remove a listing together with its pictures and favourites.
    async fn delete(&self, id: Uuid) -> Result<(), HousePersistenceError>;

    /// All listings submitted by `owner`, optionally narrowed by a search
    /// term, newest first.
    async fn list_by_owner<'a>(
        &self,
        owner: Uuid,
        search: Option<&'a str>,
    ) -> Result<Vec<House>, HousePersistenceError>;
}
