//! Saved-listing service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::house::House;
use crate::domain::ports::{
    ALREADY_FAVORITE, FavoritePersistenceError, FavoriteRepository, FavoritesCommand,
    FavoritesQuery, HOUSE_NOT_FOUND, HousePersistenceError, HouseRepository,
};
use crate::domain::user::UserId;

/// [`FavoritesQuery`] and [`FavoritesCommand`] over the favourite and house
/// repositories.
pub struct FavoritesService {
    favorites: Arc<dyn FavoriteRepository>,
    houses: Arc<dyn HouseRepository>,
}

impl FavoritesService {
    /// Build the service over its storage ports.
    pub fn new(favorites: Arc<dyn FavoriteRepository>, houses: Arc<dyn HouseRepository>) -> Self {
        Self { favorites, houses }
    }
}

fn map_favorite_error(error: FavoritePersistenceError) -> Error {
    match error {
        FavoritePersistenceError::Connection { message } => {
            error!(%message, "favourite storage unavailable");
            Error::service_unavailable("favourite storage unavailable")
        }
        FavoritePersistenceError::Query { message } => {
            error!(%message, "favourite storage query failed");
            Error::internal("favourite storage query failed")
        }
        FavoritePersistenceError::Duplicate { .. } => Error::invalid_request(ALREADY_FAVORITE),
    }
}

fn map_house_error(error: HousePersistenceError) -> Error {
    match error {
        HousePersistenceError::Connection { message } => {
            error!(%message, "house storage unavailable");
            Error::service_unavailable("house storage unavailable")
        }
        other => {
            error!(error = %other, "house lookup failed");
            Error::internal("house storage query failed")
        }
    }
}

#[async_trait]
impl FavoritesQuery for FavoritesService {
    async fn list(&self, user: UserId) -> Result<Vec<House>, Error> {
        self.favorites
            .houses_for_user(user.as_uuid())
            .await
            .map_err(map_favorite_error)
    }
}

#[async_trait]
impl FavoritesCommand for FavoritesService {
    async fn add(&self, user: UserId, house: Uuid) -> Result<House, Error> {
        let found = self
            .houses
            .find_by_id(house)
            .await
            .map_err(map_house_error)?
            .ok_or_else(|| Error::not_found(HOUSE_NOT_FOUND))?;
        self.favorites
            .add(user.as_uuid(), house)
            .await
            .map_err(map_favorite_error)?;
        Ok(found)
    }

    async fn remove(&self, user: UserId, house: Uuid) -> Result<(), Error> {
        let removed = self
            .favorites
            .remove(user.as_uuid(), house)
            .await
            .map_err(map_favorite_error)?;
        debug!(%user, %house, removed, "favourite removal applied");
        Ok(())
    }
}
