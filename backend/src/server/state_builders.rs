//! Builders selecting database-backed or fixture ports for the HTTP state.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::ports::{
    FixtureAuthService, FixtureFavorites, FixtureHouses, FixtureImageHost, FixtureListingFeed,
    ImageHost, ListingFeed,
};
use crate::domain::{FavoritesService, ListingService, PasswordAuthService};
use crate::inbound::http::HttpState;
use crate::outbound::image_host::HttpImageHost;
use crate::outbound::listing_feed::HttpListingFeed;
use crate::outbound::persistence::{
    DbPool, DieselFavoriteRepository, DieselHouseRepository, DieselUserRepository,
};

use super::ServerConfig;

const OUTBOUND_TIMEOUT: Duration = Duration::from_secs(10);

fn build_image_host(config: &ServerConfig) -> std::io::Result<Arc<dyn ImageHost>> {
    match &config.image_host {
        Some(settings) => {
            let host = HttpImageHost::new(
                settings.endpoint.clone(),
                settings.api_key.clone(),
                OUTBOUND_TIMEOUT,
            )
            .map_err(|err| std::io::Error::other(format!("image host client failed: {err}")))?;
            Ok(Arc::new(host))
        }
        None => Ok(Arc::new(FixtureImageHost)),
    }
}

fn build_listing_feed(config: &ServerConfig) -> std::io::Result<Arc<dyn ListingFeed>> {
    match &config.listing_feed {
        Some(settings) => {
            let feed = HttpListingFeed::new(
                settings.base_url.clone(),
                settings.api_key.clone(),
                OUTBOUND_TIMEOUT,
            )
            .map_err(|err| std::io::Error::other(format!("listing feed client failed: {err}")))?;
            Ok(Arc::new(feed))
        }
        None => Ok(Arc::new(FixtureListingFeed)),
    }
}

fn build_database_state(pool: &DbPool, config: &ServerConfig) -> std::io::Result<HttpState> {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let houses = Arc::new(DieselHouseRepository::new(pool.clone()));
    let favorites = Arc::new(DieselFavoriteRepository::new(pool.clone()));

    let auth = Arc::new(PasswordAuthService::new(users));
    let listings = Arc::new(ListingService::new(
        houses.clone(),
        build_image_host(config)?,
    ));
    let saved = Arc::new(FavoritesService::new(favorites, houses));

    Ok(HttpState {
        auth,
        houses_query: listings.clone(),
        houses_command: listings,
        favorites_query: saved.clone(),
        favorites_command: saved,
        feed: build_listing_feed(config)?,
    })
}

fn build_fixture_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let houses = FixtureHouses::default();
    let favorites = Arc::new(FixtureFavorites::new(houses.clone()));

    Ok(HttpState {
        auth: Arc::new(FixtureAuthService::default()),
        houses_query: Arc::new(houses.clone()),
        houses_command: Arc::new(houses),
        favorites_query: favorites.clone(),
        favorites_command: favorites,
        feed: build_listing_feed(config)?,
    })
}

/// Build the HTTP state, database-backed when a pool is configured and
/// fixture-backed otherwise.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    match &config.db_pool {
        Some(pool) => build_database_state(pool, config),
        None => build_fixture_state(config),
    }
}
