//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports, backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling. The adapters
//! stay thin: they translate between Diesel rows and domain types and map
//! database failures onto the port error enums. Row structs (`models.rs`)
//! and table definitions (`schema.rs`) never leave this module.

mod diesel_error_mapping;
mod diesel_favorite_repository;
mod diesel_helpers;
mod diesel_house_repository;
mod diesel_seed_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_favorite_repository::DieselFavoriteRepository;
pub use diesel_house_repository::DieselHouseRepository;
pub use diesel_seed_repository::DieselSeedRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
