//! Domain model of the listing service.
//!
//! Pure types, use-case services and the ports they talk through. Nothing in
//! this module touches HTTP, SQL or upstream APIs directly.

mod account_service;
mod auth;
mod error;
mod favorites_service;
pub(crate) mod house;
mod listing_service;
pub(crate) mod picture;
pub mod ports;
mod trace_id;
mod user;

pub use account_service::{BCRYPT_COST, PasswordAuthService};
pub use auth::{CredentialsError, LoginCredentials, NewRegistration};
pub use error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use favorites_service::FavoritesService;
pub use house::{
    House, HouseFilter, HousePage, HouseStatus, HouseUpdate, InvalidHouseStatus, NewHouse,
};
pub use listing_service::ListingService;
pub use picture::{NewPicture, Picture};
pub use trace_id::TraceId;
pub use user::{UserId, UserProfile};
