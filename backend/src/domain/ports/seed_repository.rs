//! Bulk seeding port used by the `seed` binary.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::house::NewHouse;
use crate::domain::picture::NewPicture;
use crate::domain::ports::macros::define_port_error;
use crate::domain::ports::user_repository::NewUserRecord;

define_port_error! {
    /// Failures surfaced by [`SeedRepository`] implementations.
    SeedPersistenceError {
        /// Could not obtain or keep a storage connection.
        Connection => "seed storage connection failure: {message}",
        /// The storage backend rejected the operation.
        Query => "seed storage query failure: {message}",
    }
}

/// Port for wiping and repopulating demo data.
///
/// Unlike the request-path repositories, seeding controls identifiers
/// explicitly so reseeding with the same plan is reproducible.
#[async_trait]
pub trait SeedRepository: Send + Sync {
    /// Delete all favourites, pictures, houses and users, in that order.
    async fn clear_all(&self) -> Result<(), SeedPersistenceError>;

    /// Insert an account under a fixed identifier.
    async fn insert_user(&self, id: Uuid, record: NewUserRecord)
    -> Result<(), SeedPersistenceError>;

    /// Insert a listing and its pictures under a fixed identifier.
    async fn insert_house(
        &self,
        id: Uuid,
        owner: Uuid,
        house: NewHouse,
        pictures: Vec<NewPicture>,
    ) -> Result<(), SeedPersistenceError>;

    /// Record a favourite for a seeded user/house pair.
    async fn insert_favorite(&self, user: Uuid, house: Uuid) -> Result<(), SeedPersistenceError>;
}
