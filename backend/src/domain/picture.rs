//! Listing gallery pictures.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A stored picture attached to a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Picture {
    /// Unique identifier.
    pub id: Uuid,
    /// Listing this picture belongs to.
    pub house_id: Uuid,
    /// Public image URL on the image host.
    pub url: String,
    /// Accessible description of the image.
    pub alt_text: Option<String>,
    /// Whether this is the listing's primary image.
    pub is_primary: bool,
    /// Zero-based display order.
    pub position: i32,
}

/// A picture to attach when creating or seeding a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPicture {
    /// Public image URL.
    pub url: String,
    /// Accessible description of the image.
    pub alt_text: Option<String>,
    /// Whether this is the listing's primary image.
    pub is_primary: bool,
    /// Zero-based display order.
    pub position: i32,
}
