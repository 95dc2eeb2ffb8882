//! Domain ports implemented by the persistence adapters.
//!
//! Each store operation is a thin wrapper over one parametrized query.
//! Adapters map their backend failures into [`StoreError`] so the
//! services see predictable variants instead of driver errors.

use async_trait::async_trait;
use thiserror::Error;

use super::feed::{FeedEntry, NewVisit, Visit};
use super::follow::FollowListEntry;
use super::user::UserId;

/// Errors surfaced by the persistence adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Storage backend could not be reached or a connection could not be
    /// checked out of the pool.
    #[error("storage connection failed: {message}")]
    Connection {
        /// Driver-provided description.
        message: String,
    },
    /// A query failed to execute.
    #[error("storage query failed: {message}")]
    Query {
        /// Driver-provided description.
        message: String,
    },
}

impl StoreError {
    /// Helper for connection-level failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl From<StoreError> for super::error::DomainError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Connection { message } => Self::service_unavailable(message),
            StoreError::Query { message } => Self::internal(message),
        }
    }
}

/// Persistence operations over the `follows` relation.
///
/// Writes are single statements; uniqueness of the `(follower,
/// following)` pair and the self-follow ban are enforced by database
/// constraints so interleaved concurrent calls stay race-safe.
#[async_trait]
pub trait FollowStore: Send + Sync {
    /// Insert the edge unless it already exists.
    ///
    /// Returns the number of rows written: zero means the pair was
    /// already present *or* the target user does not exist — the
    /// insert-or-ignore contract deliberately does not distinguish the
    /// two.
    async fn insert_edge(&self, follower: UserId, following: UserId)
        -> Result<usize, StoreError>;

    /// Delete the edge if present; zero affected rows when absent.
    async fn delete_edge(&self, follower: UserId, following: UserId)
        -> Result<usize, StoreError>;

    /// Whether the directed edge exists.
    async fn edge_exists(&self, follower: UserId, following: UserId) -> Result<bool, StoreError>;

    /// Number of users `user` follows.
    async fn count_following(&self, user: UserId) -> Result<i64, StoreError>;

    /// Number of users following `user`.
    async fn count_followers(&self, user: UserId) -> Result<i64, StoreError>;

    /// Users that `subject` follows, in edge insertion order, annotated
    /// with whether `viewer` follows each of them.
    async fn list_following(
        &self,
        viewer: Option<UserId>,
        subject: UserId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<FollowListEntry>, StoreError>;

    /// Users following `subject`; symmetric to [`Self::list_following`]
    /// over the inbound edge direction.
    async fn list_followers(
        &self,
        viewer: Option<UserId>,
        subject: UserId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<FollowListEntry>, StoreError>;
}

/// Persistence operations over visits and their like edges.
#[async_trait]
pub trait FeedStore: Send + Sync {
    /// Persist a new visit and return the stored row.
    async fn insert_visit(&self, visit: NewVisit) -> Result<Visit, StoreError>;

    /// Joined feed rows, newest first, restricted to ids below
    /// `after_id` when given.
    async fn list_feed(
        &self,
        after_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<FeedEntry>, StoreError>;

    /// Feed restricted to one author.
    async fn list_feed_by_user(
        &self,
        user: UserId,
        after_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<FeedEntry>, StoreError>;

    /// Feed restricted to one restaurant.
    async fn list_feed_by_restaurant(
        &self,
        restaurant_id: i64,
        after_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<FeedEntry>, StoreError>;

    /// Every visit authored by users the viewer follows, newest first.
    /// Deliberately unpaginated; see the feed service for the contract.
    async fn list_feed_by_following(&self, viewer: UserId) -> Result<Vec<FeedEntry>, StoreError>;

    /// Record that `user` likes `visit_id`; duplicate likes are ignored.
    async fn insert_like(&self, user: UserId, visit_id: i64) -> Result<(), StoreError>;

    /// Remove the like edge if present.
    async fn delete_like(&self, user: UserId, visit_id: i64) -> Result<(), StoreError>;

    /// Whether the like edge exists.
    async fn like_exists(&self, user: UserId, visit_id: i64) -> Result<bool, StoreError>;
}
