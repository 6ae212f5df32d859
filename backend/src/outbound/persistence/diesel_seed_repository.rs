//! PostgreSQL-backed demo-data seeding adapter.
//!
//! Seeding controls identifiers explicitly so the same plan produces the
//! same rows. Each listing is applied in its own transaction; `clear_all`
//! deletes dependants before their parents.

use async_trait::async_trait;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::house::NewHouse;
use crate::domain::picture::NewPicture;
use crate::domain::ports::{NewUserRecord, SeedPersistenceError, SeedRepository};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewFavoriteRow, NewHouseRow, NewPictureRow, NewUserRow};
use super::pool::DbPool;
use super::schema::{houses, pictures, user_favorites, users};

/// Diesel-backed implementation of the seeding port.
#[derive(Clone)]
pub struct DieselSeedRepository {
    pool: DbPool,
}

impl DieselSeedRepository {
    /// Create a new seeding repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_connection_error(error: super::pool::PoolError) -> SeedPersistenceError {
    map_pool_error(error, SeedPersistenceError::connection)
}

fn map_query_error(error: diesel::result::Error) -> SeedPersistenceError {
    map_diesel_error(
        error,
        SeedPersistenceError::query,
        SeedPersistenceError::connection,
    )
}

#[async_trait]
impl SeedRepository for DieselSeedRepository {
    async fn clear_all(&self) -> Result<(), SeedPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_connection_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::delete(user_favorites::table).execute(conn).await?;
                diesel::delete(pictures::table).execute(conn).await?;
                diesel::delete(houses::table).execute(conn).await?;
                diesel::delete(users::table).execute(conn).await?;
                Ok::<(), diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_query_error)
    }

    async fn insert_user(
        &self,
        id: Uuid,
        record: NewUserRecord,
    ) -> Result<(), SeedPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_connection_error)?;

        let row = NewUserRow::from_record(id, &record);
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_query_error)?;

        Ok(())
    }

    async fn insert_house(
        &self,
        id: Uuid,
        owner: Uuid,
        house: NewHouse,
        gallery: Vec<NewPicture>,
    ) -> Result<(), SeedPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_connection_error)?;

        let row = NewHouseRow::from_new_house(id, Some(owner), &house);
        let picture_rows: Vec<NewPictureRow<'_>> = gallery
            .iter()
            .map(|picture| NewPictureRow::from_new_picture(id, picture))
            .collect();

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(houses::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                if !picture_rows.is_empty() {
                    diesel::insert_into(pictures::table)
                        .values(&picture_rows)
                        .execute(conn)
                        .await?;
                }
                Ok::<(), diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_query_error)
    }

    async fn insert_favorite(&self, user: Uuid, house: Uuid) -> Result<(), SeedPersistenceError> {
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
            .map_err(map_query_error)?;

        Ok(())
    }
}
