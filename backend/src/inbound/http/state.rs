//! Shared application state handed to HTTP handlers.

use std::sync::Arc;

use crate::domain::ports::{
    AuthService, FavoritesCommand, FavoritesQuery, HousesCommand, HousesQuery, ListingFeed,
};

/// Use-case ports the handlers dispatch to.
///
/// Built once at startup by the server's state builders and shared across
/// workers via `web::Data`.
#[derive(Clone)]
pub struct HttpState {
    /// Registration, login and profile lookup.
    pub auth: Arc<dyn AuthService>,
    /// Listing browse operations.
    pub houses_query: Arc<dyn HousesQuery>,
    /// Listing submission operations.
    pub houses_command: Arc<dyn HousesCommand>,
    /// Saved-listing reads.
    pub favorites_query: Arc<dyn FavoritesQuery>,
    /// Saved-listing writes.
    pub favorites_command: Arc<dyn FavoritesCommand>,
    /// External listing feed proxy.
    pub feed: Arc<dyn ListingFeed>,
}
