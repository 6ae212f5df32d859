//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation. Regenerate with
//! `diesel print-schema` after a migration changes the schema.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Login email, lowercased, unique.
        email -> Varchar,
        /// Display name.
        name -> Varchar,
        /// Bcrypt hash of the account password.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// House listings.
    houses (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// External listing number, unique when present.
        zpid -> Nullable<Int8>,
        /// Street number and name.
        street_address -> Varchar,
        /// City name.
        city -> Varchar,
        /// State or region code.
        state -> Varchar,
        /// Postal code.
        zipcode -> Varchar,
        /// Neighbourhood label.
        neighborhood -> Nullable<Varchar>,
        /// Community label.
        community -> Nullable<Varchar>,
        /// Subdivision label.
        subdivision -> Nullable<Varchar>,
        /// Bedroom count.
        bedrooms -> Int4,
        /// Bathroom count.
        bathrooms -> Int4,
        /// Asking price in `currency` units.
        price -> Float8,
        /// Construction year.
        year_built -> Int4,
        /// Longitude of the property.
        longitude -> Float8,
        /// Latitude of the property.
        latitude -> Float8,
        /// Marketing status wire token.
        home_status -> Varchar,
        /// Property type label.
        home_type -> Varchar,
        /// Marketing description.
        description -> Text,
        /// Interior area in square feet.
        living_area -> Int4,
        /// ISO currency code.
        currency -> Varchar,
        /// ISO date the listing was first posted.
        date_posted -> Varchar,
        /// Submitting account; NULL for imported stock.
        owner_id -> Nullable<Uuid>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Listing gallery pictures.
    pictures (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning listing (cascade delete).
        house_id -> Uuid,
        /// Public image URL on the image host.
        url -> Text,
        /// Accessible description of the image.
        alt_text -> Nullable<Text>,
        /// Whether this is the listing's primary image.
        is_primary -> Bool,
        /// Zero-based display order.
        position -> Int4,
    }
}

diesel::table! {
    /// Per-user saved listings; `(user_id, house_id)` unique.
    user_favorites (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Saving account (cascade delete).
        user_id -> Uuid,
        /// Saved listing (cascade delete).
        house_id -> Uuid,
        /// Instant the favourite was recorded.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(pictures -> houses (house_id));
diesel::joinable!(user_favorites -> users (user_id));
diesel::joinable!(user_favorites -> houses (house_id));

diesel::allow_tables_to_appear_in_same_query!(users, houses, pictures, user_favorites);
