//! Deterministic demo listing generation for database seeding.
//!
//! This crate produces a reproducible plan of demo houses, pictures and a
//! system user from a numeric seed. It is independent of backend domain types
//! to avoid circular dependencies; the seed binary converts the plan into
//! persistence rows at the point of use.
//!
//! # Example
//!
//! ```
//! use listing_data::{PlanConfig, generate_listing_plan};
//!
//! let config = PlanConfig::default();
//! let plan = generate_listing_plan(&config).expect("generation succeeds");
//!
//! assert_eq!(plan.houses.len(), 100);
//! // Same seed produces an identical plan
//! let again = generate_listing_plan(&config).expect("generation succeeds");
//! assert_eq!(plan, again);
//! ```

mod error;
mod generator;
mod plan;
mod tables;

pub use error::GenerationError;
pub use generator::{DEFAULT_HOUSE_COUNT, DEFAULT_SEED, PlanConfig, generate_listing_plan};
pub use plan::{HouseSeed, ListingPlan, ListingStatusSeed, PictureSeed, SystemUserSeed};
