//! Favourite storage port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::house::House;
use crate::domain::ports::macros::define_port_error;

define_port_error! {
    /// Failures surfaced by [`FavoriteRepository`] implementations.
    FavoritePersistenceError {
        /// Could not obtain or keep a storage connection.
        Connection => "favourite storage connection failure: {message}",
        /// The storage backend rejected the operation.
        Query => "favourite storage query failure: {message}",
        /// The pair is already favourited.
        Duplicate => "favourite already recorded: {message}",
    }
}

/// Port for per-user favourite persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// All houses the user has favourited, most recently saved first.
    async fn houses_for_user(&self, user: Uuid) -> Result<Vec<House>, FavoritePersistenceError>;

    /// Record a favourite.
    async fn add(&self, user: Uuid, house: Uuid) -> Result<(), FavoritePersistenceError>;

    /// Remove a favourite if present, returning the number of rows removed.
    async fn remove(&self, user: Uuid, house: Uuid) -> Result<u64, FavoritePersistenceError>;
}
