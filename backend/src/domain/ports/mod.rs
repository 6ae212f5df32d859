//! Ports between the domain and its adapters.
//!
//! Storage and upstream-service ports are implemented by outbound adapters;
//! the use-case ports ([`AuthService`], [`HousesQuery`], [`HousesCommand`],
//! [`FavoritesQuery`], [`FavoritesCommand`], [`ListingFeed`]) are what the
//! HTTP handlers call. Each use-case port ships a fixture implementation for
//! database-less deployments and endpoint tests.

pub(crate) mod macros;

mod auth_service;
mod favorite_repository;
mod favorites;
mod house_repository;
mod houses;
mod image_host;
mod listing_feed;
mod seed_repository;
mod user_repository;

pub use auth_service::{
    AuthService, BAD_CREDENTIALS, EMAIL_TAKEN, FixtureAuthService, USER_NOT_FOUND,
};
pub use favorite_repository::{FavoritePersistenceError, FavoriteRepository};
pub use favorites::{
    ADDED_TO_FAVORITES, ALREADY_FAVORITE, FavoritesCommand, FavoritesQuery, FixtureFavorites,
    REMOVED_FROM_FAVORITES,
};
pub use house_repository::{HousePersistenceError, HouseRepository};
pub use houses::{
    DELETE_FORBIDDEN, DUPLICATE_ZPID, EDIT_FORBIDDEN, FixtureHouses, HOUSE_NOT_FOUND,
    HousesCommand, HousesQuery,
};
pub use image_host::{FixtureImageHost, ImageHost, ImageHostError, ImageUpload};
pub use listing_feed::{FeedPage, FixtureListingFeed, ListingFeed, ListingFeedError};
pub use seed_repository::{SeedPersistenceError, SeedRepository};
pub use user_repository::{NewUserRecord, StoredUser, UserPersistenceError, UserRepository};

#[cfg(test)]
pub use favorite_repository::MockFavoriteRepository;
#[cfg(test)]
pub use house_repository::MockHouseRepository;
#[cfg(test)]
pub use image_host::MockImageHost;
#[cfg(test)]
pub use listing_feed::MockListingFeed;
#[cfg(test)]
pub use user_repository::MockUserRepository;
