//! PostgreSQL-backed favourite repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::house::House;
use crate::domain::ports::{FavoritePersistenceError, FavoriteRepository};

use super::diesel_error_mapping::{is_unique_violation_on, map_diesel_error, map_pool_error};
use super::diesel_helpers::{attach_galleries, load_galleries};
use super::models::{HouseRow, NewFavoriteRow};
use super::pool::DbPool;
use super::schema::{houses, user_favorites};

/// Diesel-backed implementation of the favourite repository port.
#[derive(Clone)]
pub struct DieselFavoriteRepository {
    pool: DbPool,
}

impl DieselFavoriteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_connection_error(error: super::pool::PoolError) -> FavoritePersistenceError {
    map_pool_error(error, FavoritePersistenceError::connection)
}

fn map_query_error(error: diesel::result::Error) -> FavoritePersistenceError {
    map_diesel_error(
        error,
        FavoritePersistenceError::query,
        FavoritePersistenceError::connection,
    )
}

fn map_add_error(error: diesel::result::Error) -> FavoritePersistenceError {
    if is_unique_violation_on(&error, "user_favorites") {
        return FavoritePersistenceError::duplicate(error.to_string());
    }
    map_query_error(error)
}

#[async_trait]
impl FavoriteRepository for DieselFavoriteRepository {
    async fn houses_for_user(&self, user: Uuid) -> Result<Vec<House>, FavoritePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_connection_error)?;

        let rows: Vec<HouseRow> = user_favorites::table
            .inner_join(houses::table)
            .filter(user_favorites::user_id.eq(user))
            .order(user_favorites::created_at.desc())
            .select(HouseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_query_error)?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let galleries = load_galleries(&mut conn, &ids)
            .await
            .map_err(map_query_error)?;
        attach_galleries(rows, galleries)
            .map_err(|err| FavoritePersistenceError::query(err.to_string()))
    }

    async fn add(&self, user: Uuid, house: Uuid) -> Result<(), FavoritePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_connection_error)?;

        let row = NewFavoriteRow {
            id: Uuid::new_v4(),
            user_id: user,
            house_id: house,
        };
        diesel::insert_into(user_favorites::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_add_error)?;

        Ok(())
    }

    async fn remove(&self, user: Uuid, house: Uuid) -> Result<u64, FavoritePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_connection_error)?;

        let removed = diesel::delete(
            user_favorites::table
                .filter(user_favorites::user_id.eq(user))
                .filter(user_favorites::house_id.eq(house)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_query_error)?;

        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }
}
