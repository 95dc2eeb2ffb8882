//! Row types bridging SQL results and domain read models.
//!
//! The joined feed queries select flat aliased columns; [`FeedRow`] is
//! the one place that reshapes them into the nested feed entry. Every
//! feed listing reuses it, so the shape cannot drift between queries.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Bool, Date, Double, Nullable, Text, Timestamptz};

use crate::domain::{
    category_from_db, FeedAuthor, FeedEntry, FeedRestaurant, FollowListEntry, UserId, Visit,
};

use super::schema::visits;

/// Insertable visit review.
#[derive(Debug, Insertable)]
#[diesel(table_name = visits)]
pub struct NewVisitRow<'a> {
    /// Author.
    pub user_id: i64,
    /// Reviewed restaurant.
    pub restaurant_id: i64,
    /// Date of the visit being reviewed.
    pub visit_date: NaiveDate,
    /// Free-text review body.
    pub review: &'a str,
}

/// A `visits` row as stored.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = visits)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VisitRow {
    /// Primary key.
    pub id: i64,
    /// Author.
    pub user_id: i64,
    /// Reviewed restaurant.
    pub restaurant_id: i64,
    /// Date of the visit being reviewed.
    pub visit_date: NaiveDate,
    /// Free-text review body.
    pub review: String,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<VisitRow> for Visit {
    fn from(row: VisitRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId::new(row.user_id),
            restaurant_id: row.restaurant_id,
            visit_date: row.visit_date,
            review: row.review,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Flat result row of the joined feed queries.
///
/// Field names match the column aliases in the SQL; restaurant columns
/// carry an `r_` prefix and user columns a `u_` prefix.
#[derive(Debug, QueryableByName)]
pub struct FeedRow {
    /// Visit id.
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    /// Author id.
    #[diesel(sql_type = BigInt)]
    pub user_id: i64,
    /// Reviewed restaurant id.
    #[diesel(sql_type = BigInt)]
    pub restaurant_id: i64,
    /// Date of the visit being reviewed.
    #[diesel(sql_type = Date)]
    pub visit_date: NaiveDate,
    /// Free-text review body.
    #[diesel(sql_type = Text)]
    pub review: String,
    /// Visit creation timestamp.
    #[diesel(sql_type = Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Visit modification timestamp.
    #[diesel(sql_type = Timestamptz)]
    pub updated_at: DateTime<Utc>,
    /// Restaurant name.
    #[diesel(sql_type = Text)]
    pub r_name: String,
    /// Restaurant address.
    #[diesel(sql_type = Nullable<Text>)]
    pub r_address: Option<String>,
    /// Restaurant contact number.
    #[diesel(sql_type = Nullable<Text>)]
    pub r_phone_number: Option<String>,
    /// Restaurant category.
    #[diesel(sql_type = Nullable<Text>)]
    pub r_category: Option<String>,
    /// Restaurant latitude.
    #[diesel(sql_type = Double)]
    pub r_latitude: f64,
    /// Restaurant longitude.
    #[diesel(sql_type = Double)]
    pub r_longitude: f64,
    /// External place-search identifier.
    #[diesel(sql_type = BigInt)]
    pub r_kakao_place_id: i64,
    /// Restaurant creation timestamp.
    #[diesel(sql_type = Timestamptz)]
    pub r_created_at: DateTime<Utc>,
    /// Restaurant modification timestamp.
    #[diesel(sql_type = Timestamptz)]
    pub r_updated_at: DateTime<Utc>,
    /// Author nickname.
    #[diesel(sql_type = Text)]
    pub u_nickname: String,
    /// Author profile image reference.
    #[diesel(sql_type = Nullable<Text>)]
    pub u_profile_image: Option<String>,
    /// Author introduction.
    #[diesel(sql_type = Nullable<Text>)]
    pub u_introduction: Option<String>,
    /// Author category.
    #[diesel(sql_type = Nullable<Text>)]
    pub u_category: Option<String>,
    /// Distinct users who liked the restaurant.
    #[diesel(sql_type = BigInt)]
    pub restaurant_like_count: i64,
    /// Distinct users who liked the visit.
    #[diesel(sql_type = BigInt)]
    pub visit_like_count: i64,
}

impl FeedRow {
    /// Reshape the flat joined columns into the nested feed entry.
    #[must_use]
    pub fn into_entry(self) -> FeedEntry {
        FeedEntry {
            id: self.id,
            user_id: UserId::new(self.user_id),
            restaurant_id: self.restaurant_id,
            visit_date: self.visit_date,
            review: self.review,
            created_at: self.created_at,
            updated_at: self.updated_at,
            visit_like_count: self.visit_like_count,
            restaurant: FeedRestaurant {
                name: self.r_name,
                address: self.r_address,
                phone_number: self.r_phone_number,
                category: self.r_category,
                latitude: self.r_latitude,
                longitude: self.r_longitude,
                kakao_place_id: self.r_kakao_place_id,
                created_at: self.r_created_at,
                updated_at: self.r_updated_at,
                restaurant_like_count: self.restaurant_like_count,
            },
            user: FeedAuthor {
                nickname: self.u_nickname,
                profile_image: self.u_profile_image,
                introduction: self.u_introduction,
                category: category_from_db(self.u_category.as_deref()),
            },
        }
    }
}

/// Result row of the annotated follower/following listings.
#[derive(Debug, QueryableByName)]
pub struct FollowEntryRow {
    /// Listed user's id.
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    /// Listed user's nickname.
    #[diesel(sql_type = Text)]
    pub nickname: String,
    /// Listed user's category.
    #[diesel(sql_type = Nullable<Text>)]
    pub category: Option<String>,
    /// Listed user's introduction.
    #[diesel(sql_type = Nullable<Text>)]
    pub introduction: Option<String>,
    /// Whether the viewer follows this user; computed in SQL from the
    /// left-joined viewer edge.
    #[diesel(sql_type = Bool)]
    pub follow: bool,
}

impl FollowEntryRow {
    /// Convert into the domain listing entry.
    #[must_use]
    pub fn into_entry(self) -> FollowListEntry {
        FollowListEntry {
            id: UserId::new(self.id),
            nickname: self.nickname,
            category: category_from_db(self.category.as_deref()),
            introduction: self.introduction,
            follow: self.follow,
        }
    }
}
