//! Outbound adapters: PostgreSQL persistence and upstream HTTP services.

pub mod image_host;
pub mod listing_feed;
pub mod persistence;
