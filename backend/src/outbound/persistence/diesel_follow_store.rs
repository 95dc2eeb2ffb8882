//! PostgreSQL-backed [`FollowStore`] implementation using Diesel.
//!
//! Edge writes are single conflict-ignoring statements so concurrent
//! follow/unfollow calls for the same pair cannot produce duplicate
//! rows or surface constraint errors. The annotated listings are raw
//! parametrized queries: the second `follows` occurrence needed for the
//! "does the viewer follow this user" flag reads more clearly as SQL
//! than as a DSL self-join.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Nullable};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FollowStore, StoreError};
use crate::domain::{FollowListEntry, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::FollowEntryRow;
use super::pool::DbPool;
use super::schema::follows;

/// Columns and joins shared by both listing directions. `f` is the edge
/// being listed; `vf` is the viewer's own edge onto the listed user.
const LIST_SELECT: &str = "SELECT u.id, u.nickname, u.category, u.introduction, \
       (vf.id IS NOT NULL) AS follow \
FROM follows f";

const VIEWER_JOIN: &str = "LEFT JOIN follows vf \
  ON vf.following_id = u.id AND vf.follower_id = $1";

/// Diesel-backed implementation of the [`FollowStore`] port.
#[derive(Clone)]
pub struct DieselFollowStore {
    pool: DbPool,
}

impl DieselFollowStore {
    /// Create a new store with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowStore for DieselFollowStore {
    async fn insert_edge(
        &self,
        follower: UserId,
        following: UserId,
    ) -> Result<usize, StoreError> {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result = diesel::insert_into(follows::table)
            .values((
                follows::follower_id.eq(follower.value()),
                follows::following_id.eq(following.value()),
            ))
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await;

        match result {
            Ok(affected) => Ok(affected),
            // A missing target user trips the foreign key instead of the
            // unique constraint. Report it as zero rows written so the
            // caller sees the same insert-or-ignore outcome for both.
            Err(DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)) => Ok(0),
            Err(error) => Err(map_diesel_error(error)),
        }
    }

    async fn delete_edge(
        &self,
        follower: UserId,
        following: UserId,
    ) -> Result<usize, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(
            follows::table.filter(
                follows::follower_id
                    .eq(follower.value())
                    .and(follows::following_id.eq(following.value())),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn edge_exists(&self, follower: UserId, following: UserId) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            follows::table.filter(
                follows::follower_id
                    .eq(follower.value())
                    .and(follows::following_id.eq(following.value())),
            ),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn count_following(&self, user: UserId) -> Result<i64, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        follows::table
            .filter(follows::follower_id.eq(user.value()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn count_followers(&self, user: UserId) -> Result<i64, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        follows::table
            .filter(follows::following_id.eq(user.value()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn list_following(
        &self,
        viewer: Option<UserId>,
        subject: UserId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<FollowListEntry>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let sql = format!(
            "{LIST_SELECT} \
             JOIN users u ON u.id = f.following_id \
             {VIEWER_JOIN} \
             WHERE f.follower_id = $2 \
             ORDER BY f.id \
             OFFSET $3 LIMIT $4"
        );

        let rows: Vec<FollowEntryRow> = diesel::sql_query(sql)
            .bind::<Nullable<BigInt>, _>(viewer.map(UserId::value))
            .bind::<BigInt, _>(subject.value())
            .bind::<BigInt, _>(offset)
            .bind::<BigInt, _>(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(FollowEntryRow::into_entry).collect())
    }

    async fn list_followers(
        &self,
        viewer: Option<UserId>,
        subject: UserId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<FollowListEntry>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let sql = format!(
            "{LIST_SELECT} \
             JOIN users u ON u.id = f.follower_id \
             {VIEWER_JOIN} \
             WHERE f.following_id = $2 \
             ORDER BY f.id \
             OFFSET $3 LIMIT $4"
        );

        let rows: Vec<FollowEntryRow> = diesel::sql_query(sql)
            .bind::<Nullable<BigInt>, _>(viewer.map(UserId::value))
            .bind::<BigInt, _>(subject.value())
            .bind::<BigInt, _>(offset)
            .bind::<BigInt, _>(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(FollowEntryRow::into_entry).collect())
    }
}
