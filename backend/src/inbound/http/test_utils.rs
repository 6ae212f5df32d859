//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Build an [`HttpState`] wired entirely to fixture ports.
pub fn fixture_state() -> crate::inbound::http::HttpState {
    use std::sync::Arc;

    use crate::domain::ports::{
        FixtureAuthService, FixtureFavorites, FixtureHouses, FixtureListingFeed,
    };

    let houses = FixtureHouses::default();
    let favorites = Arc::new(FixtureFavorites::new(houses.clone()));
    crate::inbound::http::HttpState {
        auth: Arc::new(FixtureAuthService::default()),
        houses_query: Arc::new(houses.clone()),
        houses_command: Arc::new(houses),
        favorites_query: favorites.clone(),
        favorites_command: favorites,
        feed: Arc::new(FixtureListingFeed),
    }
}
