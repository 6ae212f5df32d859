//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and are
//! never exposed to the domain. They exist solely to satisfy Diesel's type
//! requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::house::{House, HouseUpdate, InvalidHouseStatus, NewHouse};
use crate::domain::picture::{NewPicture, Picture};
use crate::domain::ports::{NewUserRecord, StoredUser};

use super::schema::{houses, pictures, user_favorites, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    #[expect(dead_code, reason = "schema field not surfaced through the API")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field not surfaced through the API")]
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for StoredUser {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
            password_hash: row.password_hash,
        }
    }
}

/// Insertable struct for creating new account records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub name: &'a str,
    pub password_hash: &'a str,
}

impl<'a> NewUserRow<'a> {
    pub(crate) fn from_record(id: Uuid, record: &'a NewUserRecord) -> Self {
        Self {
            id,
            email: &record.email,
            name: &record.name,
            password_hash: &record.password_hash,
        }
    }
}

/// Row struct for reading from the houses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = houses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HouseRow {
    pub id: Uuid,
    pub zpid: Option<i64>,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub neighborhood: Option<String>,
    pub community: Option<String>,
    pub subdivision: Option<String>,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub price: f64,
    pub year_built: i32,
    pub longitude: f64,
    pub latitude: f64,
    pub home_status: String,
    pub home_type: String,
    pub description: String,
    pub living_area: i32,
    pub currency: String,
    pub date_posted: String,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HouseRow {
    /// Rebuild the domain aggregate with its gallery attached.
    pub(crate) fn into_domain(self, gallery: Vec<Picture>) -> Result<House, InvalidHouseStatus> {
        Ok(House {
            id: self.id,
            zpid: self.zpid,
            street_address: self.street_address,
            city: self.city,
            state: self.state,
            zipcode: self.zipcode,
            neighborhood: self.neighborhood,
            community: self.community,
            subdivision: self.subdivision,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            price: self.price,
            year_built: self.year_built,
            longitude: self.longitude,
            latitude: self.latitude,
            status: self.home_status.parse()?,
            home_type: self.home_type,
            description: self.description,
            living_area: self.living_area,
            currency: self.currency,
            date_posted: self.date_posted,
            owner_id: self.owner_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            pictures: gallery,
        })
    }
}

/// Insertable struct for creating new listing records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = houses)]
pub(crate) struct NewHouseRow<'a> {
    pub id: Uuid,
    pub zpid: Option<i64>,
    pub street_address: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub zipcode: &'a str,
    pub neighborhood: Option<&'a str>,
    pub community: Option<&'a str>,
    pub subdivision: Option<&'a str>,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub price: f64,
    pub year_built: i32,
    pub longitude: f64,
    pub latitude: f64,
    pub home_status: &'a str,
    pub home_type: &'a str,
    pub description: &'a str,
    pub living_area: i32,
    pub currency: &'a str,
    pub date_posted: String,
    pub owner_id: Option<Uuid>,
}

impl<'a> NewHouseRow<'a> {
    /// Build an insert row; `date_posted` falls back to today's date.
    pub(crate) fn from_new_house(id: Uuid, owner: Option<Uuid>, house: &'a NewHouse) -> Self {
        let date_posted = house
            .date_posted
            .clone()
            .unwrap_or_else(|| Utc::now().date_naive().to_string());
        Self {
            id,
            zpid: house.zpid,
            street_address: &house.street_address,
            city: &house.city,
            state: &house.state,
            zipcode: &house.zipcode,
            neighborhood: house.neighborhood.as_deref(),
            community: house.community.as_deref(),
            subdivision: house.subdivision.as_deref(),
            bedrooms: house.bedrooms,
            bathrooms: house.bathrooms,
            price: house.price,
            year_built: house.year_built,
            longitude: house.longitude,
            latitude: house.latitude,
            home_status: house.status.as_str(),
            home_type: &house.home_type,
            description: &house.description,
            living_area: house.living_area,
            currency: &house.currency,
            date_posted,
            owner_id: owner,
        }
    }
}

/// Changeset struct for partial listing updates.
///
/// `None` fields are skipped by Diesel, so untouched columns keep their
/// stored values. `updated_at` is always refreshed.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = houses)]
pub(crate) struct HouseChangeset<'a> {
    pub zpid: Option<i64>,
    pub street_address: Option<&'a str>,
    pub city: Option<&'a str>,
    pub state: Option<&'a str>,
    pub zipcode: Option<&'a str>,
    pub neighborhood: Option<&'a str>,
    pub community: Option<&'a str>,
    pub subdivision: Option<&'a str>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub price: Option<f64>,
    pub year_built: Option<i32>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub home_status: Option<&'static str>,
    pub home_type: Option<&'a str>,
    pub description: Option<&'a str>,
    pub living_area: Option<i32>,
    pub currency: Option<&'a str>,
    pub date_posted: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> HouseChangeset<'a> {
    pub(crate) fn from_update(changes: &'a HouseUpdate) -> Self {
        Self {
            zpid: changes.zpid,
            street_address: changes.street_address.as_deref(),
            city: changes.city.as_deref(),
            state: changes.state.as_deref(),
            zipcode: changes.zipcode.as_deref(),
            neighborhood: changes.neighborhood.as_deref(),
            community: changes.community.as_deref(),
            subdivision: changes.subdivision.as_deref(),
            bedrooms: changes.bedrooms,
            bathrooms: changes.bathrooms,
            price: changes.price,
            year_built: changes.year_built,
            longitude: changes.longitude,
            latitude: changes.latitude,
            home_status: changes.status.map(|status| status.as_str()),
            home_type: changes.home_type.as_deref(),
            description: changes.description.as_deref(),
            living_area: changes.living_area,
            currency: changes.currency.as_deref(),
            date_posted: changes.date_posted.as_deref(),
            updated_at: Utc::now(),
        }
    }
}

/// Row struct for reading from the pictures table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pictures)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PictureRow {
    pub id: Uuid,
    pub house_id: Uuid,
    pub url: String,
    pub alt_text: Option<String>,
    pub is_primary: bool,
    pub position: i32,
}

impl From<PictureRow> for Picture {
    fn from(row: PictureRow) -> Self {
        Self {
            id: row.id,
            house_id: row.house_id,
            url: row.url,
            alt_text: row.alt_text,
            is_primary: row.is_primary,
            position: row.position,
        }
    }
}

/// Insertable struct for attaching pictures to a listing.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pictures)]
pub(crate) struct NewPictureRow<'a> {
    pub id: Uuid,
    pub house_id: Uuid,
    pub url: &'a str,
    pub alt_text: Option<&'a str>,
    pub is_primary: bool,
    pub position: i32,
}

impl<'a> NewPictureRow<'a> {
    pub(crate) fn from_new_picture(house_id: Uuid, picture: &'a NewPicture) -> Self {
        Self {
            id: Uuid::new_v4(),
            house_id,
            url: &picture.url,
            alt_text: picture.alt_text.as_deref(),
            is_primary: picture.is_primary,
            position: picture.position,
        }
    }
}

/// Insertable struct for recording a favourite.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_favorites)]
pub(crate) struct NewFavoriteRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub house_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::house::HouseStatus;

    fn sample_row() -> HouseRow {
        HouseRow {
            id: Uuid::new_v4(),
            zpid: Some(77),
            street_address: "12 Pine St".to_owned(),
            city: "Austin".to_owned(),
            state: "TX".to_owned(),
            zipcode: "78701".to_owned(),
            neighborhood: None,
            community: None,
            subdivision: None,
            bedrooms: 3,
            bathrooms: 2,
            price: 450_000.0,
            year_built: 1998,
            longitude: -97.74,
            latitude: 30.27,
            home_status: "FOR_SALE".to_owned(),
            home_type: "Single Family".to_owned(),
            description: "Sunny corner lot".to_owned(),
            living_area: 1850,
            currency: "USD".to_owned(),
            date_posted: "2024-06-01".to_owned(),
            owner_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn house_row_parses_stored_status() {
        let house = sample_row()
            .into_domain(Vec::new())
            .expect("valid stored row");
        assert_eq!(house.status, HouseStatus::ForSale);
        assert!(house.pictures.is_empty());
    }

    #[test]
    fn house_row_rejects_unknown_status() {
        let mut row = sample_row();
        row.home_status = "PENDING".to_owned();
        assert!(row.into_domain(Vec::new()).is_err());
    }

    #[test]
    fn changeset_skips_untouched_fields() {
        let update = HouseUpdate {
            price: Some(500_000.0),
            status: Some(HouseStatus::RecentlySold),
            ..HouseUpdate::default()
        };
        let changeset = HouseChangeset::from_update(&update);
        assert_eq!(changeset.price, Some(500_000.0));
        assert_eq!(changeset.home_status, Some("RECENTLY_SOLD"));
        assert_eq!(changeset.street_address, None);
    }

    #[test]
    fn new_house_row_defaults_posting_date() {
        let house = NewHouse {
            zpid: None,
            street_address: "12 Pine St".to_owned(),
            city: "Austin".to_owned(),
            state: "TX".to_owned(),
            zipcode: "78701".to_owned(),
            neighborhood: None,
            community: None,
            subdivision: None,
            bedrooms: 3,
            bathrooms: 2,
            price: 450_000.0,
            year_built: 1998,
            longitude: -97.74,
            latitude: 30.27,
            status: HouseStatus::ForSale,
            home_type: "Single Family".to_owned(),
            description: String::new(),
            living_area: 1850,
            currency: "USD".to_owned(),
            date_posted: None,
        };
        let row = NewHouseRow::from_new_house(Uuid::new_v4(), None, &house);
        assert_eq!(row.date_posted, Utc::now().date_naive().to_string());
    }
}
