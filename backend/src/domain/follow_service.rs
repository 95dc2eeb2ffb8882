//! Follow-graph use cases.
//!
//! Enforces the relationship invariants (no self-follow, at most one
//! edge per ordered pair) on top of the [`FollowStore`] port and shapes
//! store rows into response-ready results. The store's insert-or-ignore
//! contract means a failed follow cannot distinguish "already following"
//! from "target user missing"; both surface as one conflict.

use std::sync::Arc;

use tracing::debug;

use super::error::DomainError;
use super::follow::FollowListEntry;
use super::ports::FollowStore;
use super::user::UserId;

/// Default page length for follower/following listings.
pub const DEFAULT_LIST_LIMIT: i64 = 10;

/// Follow/unfollow and follow-graph query use cases.
#[derive(Clone)]
pub struct FollowService {
    store: Arc<dyn FollowStore>,
}

impl FollowService {
    /// Create the service over a follow store.
    pub fn new(store: Arc<dyn FollowStore>) -> Self {
        Self { store }
    }

    /// Shared invariant check for every pairwise operation.
    fn validate_pair(follower: UserId, following: UserId) -> Result<(), DomainError> {
        if follower == following {
            return Err(DomainError::invalid_request(
                "followerId and followingId must be different",
            ));
        }
        Ok(())
    }

    /// Create the follow edge.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for a self-follow; `Conflict` when no row was
    /// written, which covers both an existing edge and a missing target
    /// user.
    pub async fn follow(&self, follower: UserId, following: UserId) -> Result<(), DomainError> {
        Self::validate_pair(follower, following)?;

        let affected = self.store.insert_edge(follower, following).await?;
        if affected == 0 {
            return Err(DomainError::conflict(
                "already following, or the target user does not exist",
            ));
        }
        debug!(%follower, %following, "follow edge created");
        Ok(())
    }

    /// Remove the follow edge.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for a self-unfollow; `Conflict` when the edge
    /// did not exist.
    pub async fn unfollow(&self, follower: UserId, following: UserId) -> Result<(), DomainError> {
        Self::validate_pair(follower, following)?;

        let affected = self.store.delete_edge(follower, following).await?;
        if affected == 0 {
            return Err(DomainError::conflict("follow relationship does not exist"));
        }
        debug!(%follower, %following, "follow edge removed");
        Ok(())
    }

    /// Whether `follower` follows `following`. Never conflicts.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` when both ids are the same user.
    pub async fn is_follow(&self, follower: UserId, following: UserId) -> Result<bool, DomainError> {
        Self::validate_pair(follower, following)?;
        Ok(self.store.edge_exists(follower, following).await?)
    }

    /// Number of users `user` follows.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn following_count(&self, user: UserId) -> Result<i64, DomainError> {
        Ok(self.store.count_following(user).await?)
    }

    /// Number of users following `user`.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn follower_count(&self, user: UserId) -> Result<i64, DomainError> {
        Ok(self.store.count_followers(user).await?)
    }

    /// Users that `subject` follows, one page at a time.
    ///
    /// `page` is 1-based; `viewer` (when present) marks which listed
    /// users the viewer follows back.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for non-positive page or limit.
    pub async fn followings(
        &self,
        viewer: Option<UserId>,
        subject: UserId,
        page: i64,
        limit: i64,
    ) -> Result<Vec<FollowListEntry>, DomainError> {
        let offset = page_offset(page, limit)?;
        Ok(self
            .store
            .list_following(viewer, subject, offset, limit)
            .await?)
    }

    /// Users following `subject`; symmetric to [`Self::followings`].
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for non-positive page or limit.
    pub async fn followers(
        &self,
        viewer: Option<UserId>,
        subject: UserId,
        page: i64,
        limit: i64,
    ) -> Result<Vec<FollowListEntry>, DomainError> {
        let offset = page_offset(page, limit)?;
        Ok(self
            .store
            .list_followers(viewer, subject, offset, limit)
            .await?)
    }
}

/// Convert a 1-based page number into a row offset.
fn page_offset(page: i64, limit: i64) -> Result<i64, DomainError> {
    if page < 1 {
        return Err(DomainError::invalid_request("page must be 1 or greater"));
    }
    if limit < 1 {
        return Err(DomainError::invalid_request("limit must be 1 or greater"));
    }
    Ok((page - 1) * limit)
}
