//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use url::Url;

use crate::outbound::persistence::DbPool;

/// Upstream listing feed settings.
#[derive(Debug, Clone)]
pub struct ListingFeedSettings {
    /// Base URL the `propertiesfetch` path is joined onto.
    pub base_url: Url,
    /// Value sent in the `x-api-key` header.
    pub api_key: String,
}

/// External image host settings.
#[derive(Debug, Clone)]
pub struct ImageHostSettings {
    /// Upload endpoint receiving multipart POSTs.
    pub endpoint: Url,
    /// Value sent in the `x-api-key` header.
    pub api_key: String,
}

/// Builder-style configuration for creating the HTTP server.
///
/// Optional sections fall back to fixtures: without a database pool the
/// service runs on in-memory fixture ports, and without upstream settings
/// the feed and image host use their fixture stand-ins.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) listing_feed: Option<ListingFeedSettings>,
    pub(crate) image_host: Option<ImageHostSettings>,
}

impl ServerConfig {
    /// Construct a server configuration using application preferences.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            listing_feed: None,
            image_host: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach upstream listing feed settings.
    #[must_use]
    pub fn with_listing_feed(mut self, settings: ListingFeedSettings) -> Self {
        self.listing_feed = Some(settings);
        self
    }

    /// Attach external image host settings.
    #[must_use]
    pub fn with_image_host(mut self, settings: ImageHostSettings) -> Self {
        self.image_host = Some(settings);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
