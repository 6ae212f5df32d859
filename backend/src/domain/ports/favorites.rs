//! Favourite listing use-case ports.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::house::House;
use crate::domain::ports::houses::{FixtureHouses, HousesQuery};
use crate::domain::user::UserId;

/// Message returned when favouriting an already-favourited listing.
pub const ALREADY_FAVORITE: &str = "House already in favorites";

/// Message returned after recording a favourite.
pub const ADDED_TO_FAVORITES: &str = "Added to favorites";

/// Message returned after removing a favourite.
pub const REMOVED_FROM_FAVORITES: &str = "Removed from favorites";

/// Read-side port for a user's saved listings.
#[async_trait]
pub trait FavoritesQuery: Send + Sync {
    /// All listings the user has saved, most recently saved first.
    async fn list(&self, user: UserId) -> Result<Vec<House>, Error>;
}

/// Write-side port for saving and unsaving listings.
#[async_trait]
pub trait FavoritesCommand: Send + Sync {
    /// Save a listing and return it.
    async fn add(&self, user: UserId, house: Uuid) -> Result<House, Error>;

    /// Unsave a listing. Succeeds even when it was not saved.
    async fn remove(&self, user: UserId, house: Uuid) -> Result<(), Error>;
}

/// In-memory favourites used when no database is configured.
///
/// Backed by the shared [`FixtureHouses`] instance so saved listings
/// resolve to real demo data.
pub struct FixtureFavorites {
    houses: FixtureHouses,
    saved: Mutex<HashMap<UserId, Vec<Uuid>>>,
}

impl FixtureFavorites {
    /// A favourites fixture resolving listings through `houses`.
    #[must_use]
    pub fn new(houses: FixtureHouses) -> Self {
        Self {
            houses,
            saved: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<UserId, Vec<Uuid>>>, Error> {
        self.saved
            .lock()
            .map_err(|_| Error::internal("fixture favourite state poisoned"))
    }
}

#[async_trait]
impl FavoritesQuery for FixtureFavorites {
    async fn list(&self, user: UserId) -> Result<Vec<House>, Error> {
        let ids: Vec<Uuid> = {
            let saved = self.lock()?;
            saved.get(&user).cloned().unwrap_or_default()
        };
        let mut houses = Vec::with_capacity(ids.len());
        for id in ids.into_iter().rev() {
            // Skip listings deleted since they were saved.
            if let Ok(house) = self.houses.get(id).await {
                houses.push(house);
            }
        }
        Ok(houses)
    }
}

#[async_trait]
impl FavoritesCommand for FixtureFavorites {
    async fn add(&self, user: UserId, house: Uuid) -> Result<House, Error> {
        let found = self.houses.get(house).await?;
        let mut saved = self.lock()?;
        let entries = saved.entry(user).or_default();
        if entries.contains(&house) {
            return Err(Error::invalid_request(ALREADY_FAVORITE));
        }
        entries.push(house);
        Ok(found)
    }

    async fn remove(&self, user: UserId, house: Uuid) -> Result<(), Error> {
        let mut saved = self.lock()?;
        if let Some(entries) = saved.get_mut(&user) {
            entries.retain(|id| *id != house);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pagination::PageParams;

    use super::*;
    use crate::domain::house::HouseFilter;
    use crate::domain::ports::houses::HOUSE_NOT_FOUND;

    async fn demo_ids(houses: &FixtureHouses) -> Vec<Uuid> {
        houses
            .list(&HouseFilter::default(), PageParams::clamped(None, None))
            .await
            .expect("list succeeds")
            .houses
            .into_iter()
            .map(|house| house.id)
            .collect()
    }

    #[tokio::test]
    async fn add_then_list_returns_saved_listing() {
        let houses = FixtureHouses::default();
        let favorites = FixtureFavorites::new(houses.clone());
        let user = UserId::new(Uuid::new_v4());
        let ids = demo_ids(&houses).await;
        let first = *ids.first().expect("demo data present");
        let added = favorites.add(user, first).await.expect("add succeeds");
        assert_eq!(added.id, first);
        let listed = favorites.list(user).await.expect("list succeeds");
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn add_is_rejected_for_unknown_listing() {
        let favorites = FixtureFavorites::new(FixtureHouses::default());
        let error = favorites
            .add(UserId::new(Uuid::new_v4()), Uuid::new_v4())
            .await
            .expect_err("unknown listing fails");
        assert_eq!(error.message(), HOUSE_NOT_FOUND);
    }

    #[tokio::test]
    async fn double_add_is_rejected() {
        let houses = FixtureHouses::default();
        let favorites = FixtureFavorites::new(houses.clone());
        let user = UserId::new(Uuid::new_v4());
        let ids = demo_ids(&houses).await;
        let first = *ids.first().expect("demo data present");
        favorites.add(user, first).await.expect("first add succeeds");
        let error = favorites
            .add(user, first)
            .await
            .expect_err("second add fails");
        assert_eq!(error.message(), ALREADY_FAVORITE);
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let houses = FixtureHouses::default();
        let favorites = FixtureFavorites::new(houses.clone());
        let user = UserId::new(Uuid::new_v4());
        let ids = demo_ids(&houses).await;
        let first = *ids.first().expect("demo data present");
        favorites.add(user, first).await.expect("add succeeds");
        favorites.remove(user, first).await.expect("remove succeeds");
        favorites
            .remove(user, first)
            .await
            .expect("second remove also succeeds");
        let listed = favorites.list(user).await.expect("list succeeds");
        assert!(listed.is_empty());
    }
}
