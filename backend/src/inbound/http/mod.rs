//! Inbound HTTP adapter: handlers, session plumbing and error mapping.

pub mod auth;
pub mod error;
pub mod favorites;
pub mod feed;
pub mod health;
pub mod houses;
mod multipart;
pub mod session;
pub mod state;
pub mod test_utils;
pub mod user_houses;

pub use error::ApiResult;
pub use session::SessionContext;
pub use state::HttpState;
