//! PostgreSQL-backed [`FeedStore`] implementation using Diesel.
//!
//! The feed listings are raw parametrized queries: three joins plus two
//! `COUNT(DISTINCT …)` aggregates sit beyond what the DSL expresses
//! cleanly. All of them share one SELECT clause and one row type, so the
//! flat-to-nested reshape exists exactly once ([`FeedRow::into_entry`]).
//!
//! Keyset pagination uses the visit id: `v.id < $cursor` with a
//! descending order. The nullable cursor bind doubles as the "first
//! page" signal, mirroring the dynamic WHERE clause of an
//! offset-and-params query builder without string assembly.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Nullable};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FeedStore, StoreError};
use crate::domain::{FeedEntry, NewVisit, UserId, Visit};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{FeedRow, NewVisitRow, VisitRow};
use super::pool::DbPool;
use super::schema::{visit_likes, visits};

/// Joined columns shared by every feed listing. Restaurant columns are
/// aliased with `r_`, user columns with `u_`, matching [`FeedRow`].
const FEED_SELECT: &str = "SELECT \
       v.id, v.user_id, v.restaurant_id, v.visit_date, v.review, v.created_at, v.updated_at, \
       r.name AS r_name, r.address AS r_address, r.phone_number AS r_phone_number, \
       r.category AS r_category, r.latitude AS r_latitude, r.longitude AS r_longitude, \
       r.kakao_place_id AS r_kakao_place_id, r.created_at AS r_created_at, \
       r.updated_at AS r_updated_at, \
       u.nickname AS u_nickname, u.profile_image AS u_profile_image, \
       u.introduction AS u_introduction, u.category AS u_category, \
       COUNT(DISTINCT rl.id) AS restaurant_like_count, \
       COUNT(DISTINCT vl.id) AS visit_like_count \
FROM visits v \
JOIN restaurants r ON v.restaurant_id = r.id \
JOIN users u ON v.user_id = u.id \
LEFT JOIN restaurant_likes rl ON rl.restaurant_id = r.id \
LEFT JOIN visit_likes vl ON vl.visit_id = v.id";

/// Grouping by the three primary keys satisfies the aggregate rules and
/// keeps one output row per visit.
const FEED_GROUP_ORDER: &str = "GROUP BY v.id, r.id, u.id ORDER BY v.id DESC";

/// Diesel-backed implementation of the [`FeedStore`] port.
#[derive(Clone)]
pub struct DieselFeedStore {
    pool: DbPool,
}

impl DieselFeedStore {
    /// Create a new store with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedStore for DieselFeedStore {
    async fn insert_visit(&self, visit: NewVisit) -> Result<Visit, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewVisitRow {
            user_id: visit.user_id.value(),
            restaurant_id: visit.restaurant_id,
            visit_date: visit.visit_date,
            review: &visit.review,
        };

        // RETURNING hands back the generated id and timestamps in the
        // same statement, so no re-read is needed.
        let stored: VisitRow = diesel::insert_into(visits::table)
            .values(&row)
            .returning(VisitRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(stored.into())
    }

    async fn list_feed(
        &self,
        after_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<FeedEntry>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let sql = format!(
            "{FEED_SELECT} \
             WHERE ($1::bigint IS NULL OR v.id < $1) \
             {FEED_GROUP_ORDER} LIMIT $2"
        );

        let rows: Vec<FeedRow> = diesel::sql_query(sql)
            .bind::<Nullable<BigInt>, _>(after_id)
            .bind::<BigInt, _>(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(FeedRow::into_entry).collect())
    }

    async fn list_feed_by_user(
        &self,
        user: UserId,
        after_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<FeedEntry>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let sql = format!(
            "{FEED_SELECT} \
             WHERE v.user_id = $1 AND ($2::bigint IS NULL OR v.id < $2) \
             {FEED_GROUP_ORDER} LIMIT $3"
        );

        let rows: Vec<FeedRow> = diesel::sql_query(sql)
            .bind::<BigInt, _>(user.value())
            .bind::<Nullable<BigInt>, _>(after_id)
            .bind::<BigInt, _>(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(FeedRow::into_entry).collect())
    }

    async fn list_feed_by_restaurant(
        &self,
        restaurant_id: i64,
        after_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<FeedEntry>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let sql = format!(
            "{FEED_SELECT} \
             WHERE v.restaurant_id = $1 AND ($2::bigint IS NULL OR v.id < $2) \
             {FEED_GROUP_ORDER} LIMIT $3"
        );

        let rows: Vec<FeedRow> = diesel::sql_query(sql)
            .bind::<BigInt, _>(restaurant_id)
            .bind::<Nullable<BigInt>, _>(after_id)
            .bind::<BigInt, _>(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(FeedRow::into_entry).collect())
    }

    async fn list_feed_by_following(&self, viewer: UserId) -> Result<Vec<FeedEntry>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Unbounded by contract; callers get the whole result set.
        let sql = format!(
            "{FEED_SELECT} \
             WHERE v.user_id IN \
               (SELECT following_id FROM follows WHERE follower_id = $1) \
             {FEED_GROUP_ORDER}"
        );

        let rows: Vec<FeedRow> = diesel::sql_query(sql)
            .bind::<BigInt, _>(viewer.value())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(FeedRow::into_entry).collect())
    }

    async fn insert_like(&self, user: UserId, visit_id: i64) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Duplicate likes hit the unique pair constraint and are ignored.
        diesel::insert_into(visit_likes::table)
            .values((
                visit_likes::user_id.eq(user.value()),
                visit_likes::visit_id.eq(visit_id),
            ))
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete_like(&self, user: UserId, visit_id: i64) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(
            visit_likes::table.filter(
                visit_likes::user_id
                    .eq(user.value())
                    .and(visit_likes::visit_id.eq(visit_id)),
            ),
        )
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn like_exists(&self, user: UserId, visit_id: i64) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            visit_likes::table.filter(
                visit_likes::user_id
                    .eq(user.value())
                    .and(visit_likes::visit_id.eq(visit_id)),
            ),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }
}
