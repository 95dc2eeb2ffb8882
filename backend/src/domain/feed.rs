//! Visit (review) records and the joined feed read model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::{Category, UserId};

/// A persisted visit review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    /// Row id; ids are assigned monotonically and double as the feed cursor.
    pub id: i64,
    /// Author.
    pub user_id: UserId,
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

/// Input for posting a new visit review.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewVisit {
    /// Author.
    pub user_id: UserId,
    /// Reviewed restaurant.
    pub restaurant_id: i64,
    /// Date of the visit being reviewed.
    pub visit_date: NaiveDate,
    /// Free-text review body.
    pub review: String,
}

/// Restaurant details embedded in a feed entry.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedRestaurant {
    /// Restaurant name.
    pub name: String,
    /// Street address.
    pub address: Option<String>,
    /// Contact number.
    pub phone_number: Option<String>,
    /// Place category from the search provider.
    pub category: Option<String>,
    /// Latitude of the place.
    pub latitude: f64,
    /// Longitude of the place.
    pub longitude: f64,
    /// External place-search identifier; unique per restaurant.
    pub kakao_place_id: i64,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Distinct users who liked this restaurant.
    pub restaurant_like_count: i64,
}

/// Author details embedded in a feed entry.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedAuthor {
    /// Display name.
    pub nickname: String,
    /// Stored profile image reference.
    pub profile_image: Option<String>,
    /// Profile introduction text.
    pub introduction: Option<String>,
    /// Expertise tag; absent when the stored value predates the current set.
    pub category: Option<Category>,
}

/// One visit joined with its restaurant, author, and like aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
    /// Visit row id; the feed cursor.
    pub id: i64,
    /// Author id.
    pub user_id: UserId,
    /// Reviewed restaurant id.
    pub restaurant_id: i64,
    /// Date of the visit being reviewed.
    pub visit_date: NaiveDate,
    /// Free-text review body.
    pub review: String,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Distinct users who liked this visit.
    pub visit_like_count: i64,
    /// The reviewed restaurant.
    pub restaurant: FeedRestaurant,
    /// The review's author.
    pub user: FeedAuthor,
}
