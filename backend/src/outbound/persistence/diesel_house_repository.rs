//! PostgreSQL-backed listing repository.
//!
//! Search composes one boxed query per request and reuses it for both the
//! count and the page, so the two always agree on the filter. Galleries are
//! fetched in a single follow-up query and grouped in memory.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::house::{House, HouseFilter, HouseUpdate, NewHouse};
use crate::domain::picture::NewPicture;
use crate::domain::ports::{HousePersistenceError, HouseRepository};

use super::diesel_error_mapping::{is_unique_violation_on, map_diesel_error, map_pool_error};
use super::diesel_helpers::{attach_galleries, load_galleries};
use super::models::{HouseChangeset, HouseRow, NewHouseRow, NewPictureRow};
use super::pool::DbPool;
use super::schema::{houses, pictures, user_favorites};

/// Diesel-backed implementation of the listing repository port.
#[derive(Clone)]
pub struct DieselHouseRepository {
    pool: DbPool,
}

impl DieselHouseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_connection_error(error: super::pool::PoolError) -> HousePersistenceError {
    map_pool_error(error, HousePersistenceError::connection)
}

fn map_query_error(error: diesel::result::Error) -> HousePersistenceError {
    map_diesel_error(
        error,
        HousePersistenceError::query,
        HousePersistenceError::connection,
    )
}

fn map_write_error(error: diesel::result::Error) -> HousePersistenceError {
    if is_unique_violation_on(&error, "zpid") {
        return HousePersistenceError::duplicate_zpid(error.to_string());
    }
    map_query_error(error)
}

fn map_status_error(error: crate::domain::house::InvalidHouseStatus) -> HousePersistenceError {
    HousePersistenceError::query(error.to_string())
}

/// Build a contains-style pattern, escaping LIKE metacharacters so the
/// user's term matches literally. Postgres treats backslash as the escape
/// character by default.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    format!("%{escaped}%")
}

/// Apply the filter criteria to a fresh boxed query over the houses table.
fn filtered(filter: &HouseFilter) -> houses::BoxedQuery<'static, Pg> {
    let mut query = houses::table.into_boxed();

    if let Some(search) = filter.search.as_deref() {
        let pattern = like_pattern(search);
        query = query.filter(
            houses::street_address
                .ilike(pattern.clone())
                .or(houses::city.ilike(pattern.clone()))
                .or(houses::state.ilike(pattern.clone()))
                .or(houses::zipcode.ilike(pattern.clone()))
                .or(houses::home_type.ilike(pattern)),
        );
    }
    if let Some(status) = filter.status {
        query = query.filter(houses::home_status.eq(status.as_str()));
    }
    if let Some(min_price) = filter.min_price {
        query = query.filter(houses::price.ge(min_price));
    }
    if let Some(max_price) = filter.max_price {
        query = query.filter(houses::price.le(max_price));
    }
    if let Some(bedrooms) = filter.bedrooms {
        query = query.filter(houses::bedrooms.eq(bedrooms));
    }
    if let Some(bathrooms) = filter.bathrooms {
        query = query.filter(houses::bathrooms.eq(bathrooms));
    }
    if let Some(exclude) = filter.exclude {
        query = query.filter(houses::id.ne(exclude));
    }

    query
}

#[async_trait]
impl HouseRepository for DieselHouseRepository {
    async fn search(
        &self,
        filter: &HouseFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<House>, u64), HousePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_connection_error)?;

        let total: i64 = filtered(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_query_error)?;

        let rows: Vec<HouseRow> = filtered(filter)
            .order(houses::created_at.desc())
            .limit(limit)
            .offset(offset)
            .select(HouseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_query_error)?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let galleries = load_galleries(&mut conn, &ids)
            .await
            .map_err(map_query_error)?;
        let listings = attach_galleries(rows, galleries).map_err(map_status_error)?;

        Ok((listings, u64::try_from(total).unwrap_or(0)))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<House>, HousePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_connection_error)?;

        let row: Option<HouseRow> = houses::table
            .find(id)
            .select(HouseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_query_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut galleries = load_galleries(&mut conn, &[row.id])
            .await
            .map_err(map_query_error)?;
        let gallery = galleries.remove(&row.id).unwrap_or_default();
        row.into_domain(gallery).map(Some).map_err(map_status_error)
    }

    async fn insert(
        &self,
        owner: Uuid,
        house: NewHouse,
        gallery: Vec<NewPicture>,
    ) -> Result<House, HousePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_connection_error)?;

        let house_id = Uuid::new_v4();
        let row = NewHouseRow::from_new_house(house_id, Some(owner), &house);
        let picture_rows: Vec<NewPictureRow<'_>> = gallery
            .iter()
            .map(|picture| NewPictureRow::from_new_picture(house_id, picture))
            .collect();

        let stored: HouseRow = conn
            .transaction(|conn| {
                async move {
                    let stored: HouseRow = diesel::insert_into(houses::table)
                        .values(&row)
                        .returning(HouseRow::as_returning())
                        .get_result(conn)
                        .await?;
                    if !picture_rows.is_empty() {
                        diesel::insert_into(pictures::table)
                            .values(&picture_rows)
                            .execute(conn)
                            .await?;
                    }
                    Ok::<HouseRow, diesel::result::Error>(stored)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_write_error)?;

        let mut galleries = load_galleries(&mut conn, &[house_id])
            .await
            .map_err(map_query_error)?;
        let gallery = galleries.remove(&house_id).unwrap_or_default();
        stored.into_domain(gallery).map_err(map_status_error)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: HouseUpdate,
    ) -> Result<House, HousePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_connection_error)?;

        let changeset = HouseChangeset::from_update(&changes);
        let row: HouseRow = diesel::update(houses::table.find(id))
            .set(&changeset)
            .returning(HouseRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_write_error)?;

        let mut galleries = load_galleries(&mut conn, &[row.id])
            .await
            .map_err(map_query_error)?;
        let gallery = galleries.remove(&row.id).unwrap_or_default();
        row.into_domain(gallery).map_err(map_status_error)
    }

    async fn delete(&self, id: Uuid) -> Result<(), HousePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_connection_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::delete(user_favorites::table.filter(user_favorites::house_id.eq(id)))
                    .execute(conn)
                    .await?;
                diesel::delete(pictures::table.filter(pictures::house_id.eq(id)))
                    .execute(conn)
                    .await?;
                diesel::delete(houses::table.find(id)).execute(conn).await?;
                Ok::<(), diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_query_error)
    }

    async fn list_by_owner<'a>(
        &self,
        owner: Uuid,
        search: Option<&'a str>,
    ) -> Result<Vec<House>, HousePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_connection_error)?;

        let mut query = houses::table
            .filter(houses::owner_id.eq(owner))
            .into_boxed();
        if let Some(term) = search {
            let pattern = like_pattern(term);
            query = query.filter(
                houses::street_address
                    .ilike(pattern.clone())
                    .or(houses::city.ilike(pattern.clone()))
                    .or(houses::state.ilike(pattern.clone()))
                    .or(houses::zipcode.ilike(pattern.clone()))
                    .or(houses::home_type.ilike(pattern)),
            );
        }

        let rows: Vec<HouseRow> = query
            .order(houses::created_at.desc())
            .select(HouseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_query_error)?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let galleries = load_galleries(&mut conn, &ids)
            .await
            .map_err(map_query_error)?;
        attach_galleries(rows, galleries).map_err(map_status_error)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn zpid_unique_violation_maps_to_duplicate() {
        let error = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint \"houses_zpid_key\"".to_owned()),
        );
        assert!(matches!(
            map_write_error(error),
            HousePersistenceError::DuplicateZpid { .. }
        ));
    }

    #[rstest]
    #[case("oak", "%oak%")]
    #[case("100%", "%100\\%%")]
    #[case("unit_7", "%unit\\_7%")]
    #[case("a\\b", "%a\\\\b%")]
    fn like_patterns_match_search_terms_literally(#[case] term: &str, #[case] expected: &str) {
        assert_eq!(like_pattern(term), expected);
    }

    #[rstest]
    fn missing_row_maps_to_query_error() {
        assert!(matches!(
            map_write_error(diesel::result::Error::NotFound),
            HousePersistenceError::Query { .. }
        ));
    }
}
