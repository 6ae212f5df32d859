//! Generated listing plan types.
//!
//! These types describe the demo data to seed without depending on backend
//! domain types. The seed binary converts them into persistence rows.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Listing status token for a generated house.
///
/// Mirrors the backend's `HouseStatus` enum without creating a dependency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingStatusSeed {
    /// Listed for purchase.
    #[default]
    #[serde(rename = "FOR_SALE")]
    ForSale,
    /// Listed for rent.
    #[serde(rename = "FOR_RENT")]
    ForRent,
    /// Sold recently; kept visible for browsing history.
    #[serde(rename = "RECENTLY_SOLD")]
    RecentlySold,
}

impl ListingStatusSeed {
    /// Wire token used in JSON and database storage.
    #[must_use]
    pub const fn as_token(self) -> &'static str {
        match self {
            Self::ForSale => "FOR_SALE",
            Self::ForRent => "FOR_RENT",
            Self::RecentlySold => "RECENTLY_SOLD",
        }
    }
}

/// The account that owns and favourites every seeded house.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemUserSeed {
    /// Unique identifier for the user.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Plaintext demo password; hashed by the seed binary before storage.
    pub password: String,
}

/// A single picture attached to a generated house.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PictureSeed {
    /// Unique identifier for the picture.
    pub id: Uuid,
    /// Public image URL.
    pub url: String,
    /// Accessible description of the image.
    pub alt_text: String,
    /// Whether this is the listing's primary image.
    pub is_primary: bool,
    /// Zero-based display order.
    pub position: i32,
}

/// A generated demo house record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseSeed {
    /// Unique identifier for the house.
    pub id: Uuid,
    /// External listing number; the house's 1-based ordinal.
    pub zpid: i64,
    /// Street number and name.
    pub street_address: String,
    /// City name.
    pub city: String,
    /// Two-letter state code.
    pub state: String,
    /// Postal code.
    pub zipcode: String,
    /// Bedroom count.
    pub bedrooms: i32,
    /// Bathroom count.
    pub bathrooms: i32,
    /// Construction year.
    pub year_built: i32,
    /// Interior area in square feet.
    pub living_area: i32,
    /// Asking price (monthly rent for apartments).
    pub price: f64,
    /// Longitude with per-house jitter around the city centre.
    pub longitude: f64,
    /// Latitude with per-house jitter around the city centre.
    pub latitude: f64,
    /// Listing status token.
    pub status: ListingStatusSeed,
    /// Property type label, e.g. "Condo".
    pub home_type: String,
    /// Marketing description composed from type, rooms and features.
    pub description: String,
    /// Price currency code.
    pub currency: String,
    /// How many days before seeding the listing was posted.
    pub days_ago: u16,
    /// The listing's single seeded picture.
    pub picture: PictureSeed,
}

/// Complete demo data plan: one system user plus their houses.
///
/// Every house in the plan is owned and favourited by the system user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPlan {
    /// The owning account.
    pub user: SystemUserSeed,
    /// Generated houses in ordinal order.
    pub houses: Vec<HouseSeed>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_seed_serialises_upper_snake_tokens() {
        let sale = serde_json::to_string(&ListingStatusSeed::ForSale).expect("serialize");
        let rent = serde_json::to_string(&ListingStatusSeed::ForRent).expect("serialize");
        let sold = serde_json::to_string(&ListingStatusSeed::RecentlySold).expect("serialize");
        assert_eq!(sale, "\"FOR_SALE\"");
        assert_eq!(rent, "\"FOR_RENT\"");
        assert_eq!(sold, "\"RECENTLY_SOLD\"");
    }

    #[test]
    fn status_tokens_match_serde_names() {
        for status in [
            ListingStatusSeed::ForSale,
            ListingStatusSeed::ForRent,
            ListingStatusSeed::RecentlySold,
        ] {
            let json = serde_json::to_string(&status).expect("serialize");
            assert_eq!(json, format!("\"{}\"", status.as_token()));
        }
    }

    #[test]
    fn house_seed_serialises_to_camel_case() {
        let house = HouseSeed {
            id: Uuid::nil(),
            zpid: 1,
            street_address: "1 Main St".to_owned(),
            city: "Chicago".to_owned(),
            state: "IL".to_owned(),
            zipcode: "60601".to_owned(),
            bedrooms: 2,
            bathrooms: 1,
            year_built: 1990,
            living_area: 1200,
            price: 350_000.0,
            longitude: -87.6298,
            latitude: 41.8781,
            status: ListingStatusSeed::ForSale,
            home_type: "Condo".to_owned(),
            description: "Beautiful condo".to_owned(),
            currency: "USD".to_owned(),
            days_ago: 12,
            picture: PictureSeed {
                id: Uuid::nil(),
                url: "https://example.com/1.jpg".to_owned(),
                alt_text: "1 Main St - Photo 1".to_owned(),
                is_primary: true,
                position: 0,
            },
        };
        let json = serde_json::to_string(&house).expect("serialize");
        assert!(json.contains("streetAddress"));
        assert!(json.contains("yearBuilt"));
        assert!(json.contains("livingArea"));
        assert!(json.contains("homeType"));
        assert!(json.contains("daysAgo"));
        assert!(json.contains("isPrimary"));
    }
}
