//! Query helpers shared by the listing-reading repositories.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::house::{House, InvalidHouseStatus};
use crate::domain::picture::Picture;

use super::models::{HouseRow, PictureRow};
use super::schema::pictures;

/// Load the galleries for a set of listings, keyed by house, each ordered
/// by position ascending.
pub(crate) async fn load_galleries(
    conn: &mut AsyncPgConnection,
    house_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<Picture>>, diesel::result::Error> {
    if house_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<PictureRow> = pictures::table
        .filter(pictures::house_id.eq_any(house_ids))
        .order(pictures::position.asc())
        .select(PictureRow::as_select())
        .load(conn)
        .await?;

    let mut galleries: HashMap<Uuid, Vec<Picture>> = HashMap::new();
    for row in rows {
        galleries
            .entry(row.house_id)
            .or_default()
            .push(Picture::from(row));
    }
    Ok(galleries)
}

/// Attach loaded galleries to their rows, preserving the row order.
pub(crate) fn attach_galleries(
    rows: Vec<HouseRow>,
    mut galleries: HashMap<Uuid, Vec<Picture>>,
) -> Result<Vec<House>, InvalidHouseStatus> {
    rows.into_iter()
        .map(|row| {
            let gallery = galleries.remove(&row.id).unwrap_or_default();
            row.into_domain(gallery)
        })
        .collect()
}
