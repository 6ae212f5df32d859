//! House listing aggregate and its input types.

use chrono::{DateTime, Utc};
use pagination::Pagination;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::picture::Picture;

/// Marketing status of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum HouseStatus {
    /// Listed for purchase.
    #[default]
    #[serde(rename = "FOR_SALE")]
    ForSale,
    /// Listed for rent.
    #[serde(rename = "FOR_RENT")]
    ForRent,
    /// Sold recently; still browsable.
    #[serde(rename = "RECENTLY_SOLD")]
    RecentlySold,
}

/// Raised when a status token is not one of the recognised values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown house status `{0}`; expected FOR_SALE, FOR_RENT or RECENTLY_SOLD")]
pub struct InvalidHouseStatus(pub String);

impl HouseStatus {
    /// Wire token used in JSON and database storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ForSale => "FOR_SALE",
            Self::ForRent => "FOR_RENT",
            Self::RecentlySold => "RECENTLY_SOLD",
        }
    }
}

impl FromStr for HouseStatus {
    type Err = InvalidHouseStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "FOR_SALE" => Ok(Self::ForSale),
            "FOR_RENT" => Ok(Self::ForRent),
            "RECENTLY_SOLD" => Ok(Self::RecentlySold),
            other => Err(InvalidHouseStatus(other.to_owned())),
        }
    }
}

/// A house listing with its gallery, as served by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct House {
    /// Unique identifier.
    pub id: Uuid,
    /// Optional external listing number; unique when present.
    pub zpid: Option<i64>,
    /// Street number and name.
    pub street_address: String,
    /// City name.
    pub city: String,
    /// State or region code.
    pub state: String,
    /// Postal code.
    pub zipcode: String,
    /// Neighbourhood label, if known.
    pub neighborhood: Option<String>,
    /// Community label, if known.
    pub community: Option<String>,
    /// Subdivision label, if known.
    pub subdivision: Option<String>,
    /// Bedroom count.
    pub bedrooms: i32,
    /// Bathroom count.
    pub bathrooms: i32,
    /// Asking price in `currency` units.
    pub price: f64,
    /// Construction year.
    pub year_built: i32,
    /// Longitude of the property.
    pub longitude: f64,
    /// Latitude of the property.
    pub latitude: f64,
    /// Marketing status.
    #[serde(rename = "homeStatus")]
    pub status: HouseStatus,
    /// Property type label, e.g. "Condo".
    pub home_type: String,
    /// Marketing description.
    pub description: String,
    /// Interior area in square feet.
    pub living_area: i32,
    /// ISO currency code for `price`.
    pub currency: String,
    /// ISO date the listing was first posted.
    pub date_posted: String,
    /// Account that submitted the listing; absent for imported stock.
    pub owner_id: Option<Uuid>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
    /// Gallery ordered by position, primary first.
    pub pictures: Vec<Picture>,
}

/// Validated input for creating a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHouse {
    /// Optional external listing number.
    pub zpid: Option<i64>,
    /// Street number and name.
    pub street_address: String,
    /// City name.
    pub city: String,
    /// State or region code.
    pub state: String,
    /// Postal code.
    pub zipcode: String,
    /// Neighbourhood label.
    pub neighborhood: Option<String>,
    /// Community label.
    pub community: Option<String>,
    /// Subdivision label.
    pub subdivision: Option<String>,
    /// Bedroom count.
    pub bedrooms: i32,
    /// Bathroom count.
    pub bathrooms: i32,
    /// Asking price.
    pub price: f64,
    /// Construction year.
    pub year_built: i32,
    /// Longitude of the property.
    pub longitude: f64,
    /// Latitude of the property.
    pub latitude: f64,
    /// Marketing status.
    pub status: HouseStatus,
    /// Property type label.
    pub home_type: String,
    /// Marketing description.
    pub description: String,
    /// Interior area in square feet.
    pub living_area: i32,
    /// ISO currency code.
    pub currency: String,
    /// ISO date the listing was posted; defaults to today when absent.
    pub date_posted: Option<String>,
}

/// Partial update applied to an existing listing.
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HouseUpdate {
    /// Replacement external listing number.
    pub zpid: Option<i64>,
    /// Replacement street address.
    pub street_address: Option<String>,
    /// Replacement city.
    pub city: Option<String>,
    /// Replacement state.
    pub state: Option<String>,
    /// Replacement postal code.
    pub zipcode: Option<String>,
    /// Replacement neighbourhood label.
    pub neighborhood: Option<String>,
    /// Replacement community label.
    pub community: Option<String>,
    /// Replacement subdivision label.
    pub subdivision: Option<String>,
    /// Replacement bedroom count.
    pub bedrooms: Option<i32>,
    /// Replacement bathroom count.
    pub bathrooms: Option<i32>,
    /// Replacement price.
    pub price: Option<f64>,
    /// Replacement construction year.
    pub year_built: Option<i32>,
    /// Replacement longitude.
    pub longitude: Option<f64>,
    /// Replacement latitude.
    pub latitude: Option<f64>,
    /// Replacement status.
    pub status: Option<HouseStatus>,
    /// Replacement property type.
    pub home_type: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement interior area.
    pub living_area: Option<i32>,
    /// Replacement currency code.
    pub currency: Option<String>,
    /// Replacement posting date.
    pub date_posted: Option<String>,
}

impl HouseUpdate {
    /// Whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Filter criteria for browsing listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HouseFilter {
    /// Case-insensitive substring matched against address, city, state,
    /// zipcode and home type.
    pub search: Option<String>,
    /// Exact status match.
    pub status: Option<HouseStatus>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
    /// Exact bedroom count.
    pub bedrooms: Option<i32>,
    /// Exact bathroom count.
    pub bathrooms: Option<i32>,
    /// Listing excluded from results, e.g. the one being viewed.
    pub exclude: Option<Uuid>,
}

/// One page of listings plus the pagination envelope.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HousePage {
    /// Listings for this page, newest first.
    pub houses: Vec<House>,
    /// Page arithmetic for the full result set.
    #[schema(value_type = Object)]
    pub pagination: Pagination,
}
