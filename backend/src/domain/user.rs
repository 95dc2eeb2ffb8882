//! User identity and the expert category set.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identifier of a registered user.
///
/// Wraps the database's integer key so follower/following arguments cannot
/// be swapped with other integer ids by accident.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw database id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw database id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Expertise tag assigned to every expert profile.
///
/// The set is process-wide static configuration, not a database table;
/// registration assigns one of these and profile updates may only pick
/// from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Eats anything, reviews everything.
    FoodFighter,
    /// Runs a mukbang channel.
    MukbangYoutuber,
    /// Knows every restaurant in the neighbourhood.
    LocalGourmet,
}

impl Category {
    /// Every valid category, in registration order.
    pub const ALL: [Self; 3] = [Self::FoodFighter, Self::MukbangYoutuber, Self::LocalGourmet];

    /// The database string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FoodFighter => "food_fighter",
            Self::MukbangYoutuber => "mukbang_youtuber",
            Self::LocalGourmet => "local_gourmet",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {input}")]
pub struct ParseCategoryError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::str::FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseCategoryError {
                input: s.to_owned(),
            })
    }
}

/// Parse a category stored in the database, tolerating legacy values.
///
/// Listings must not fail because one row predates the current category
/// set; unknown values are logged and surfaced as absent.
#[must_use]
pub fn category_from_db(raw: Option<&str>) -> Option<Category> {
    let raw = raw?;
    match raw.parse::<Category>() {
        Ok(category) => Some(category),
        Err(error) => {
            tracing::warn!(value = %error.input, "unrecognised category value in storage");
            None
        }
    }
}
