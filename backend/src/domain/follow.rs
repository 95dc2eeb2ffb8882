//! Follow-graph read models.

use serde::Serialize;
use utoipa::ToSchema;

use super::user::{Category, UserId};

/// One row of a follower or following listing.
///
/// `follow` reports whether the *viewer* (the requesting user, if any)
/// follows the listed user, so clients can render a follow-back button
/// without a second round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowListEntry {
    /// The listed user's id.
    pub id: UserId,
    /// Display name.
    pub nickname: String,
    /// Expertise tag; absent when the stored value predates the current set.
    pub category: Option<Category>,
    /// Profile introduction text.
    pub introduction: Option<String>,
    /// Whether the viewer also follows this user. Always `false` for
    /// anonymous viewers.
    pub follow: bool,
}
