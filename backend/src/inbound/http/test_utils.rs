//! Test helpers for inbound HTTP components.

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;
use async_trait::async_trait;

use crate::domain::ports::{FeedStore, FollowStore, StoreError};
use crate::domain::{FeedEntry, FollowListEntry, NewVisit, UserId, Visit};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Feed store for tests that only exercise the follow handlers.
pub struct EmptyFeedStore;

#[async_trait]
impl FeedStore for EmptyFeedStore {
    async fn insert_visit(&self, _visit: NewVisit) -> Result<Visit, StoreError> {
        Err(StoreError::query("not under test"))
    }

    async fn list_feed(
        &self,
        _after_id: Option<i64>,
        _limit: i64,
    ) -> Result<Vec<FeedEntry>, StoreError> {
        Ok(Vec::new())
    }

    async fn list_feed_by_user(
        &self,
        _user: UserId,
        _after_id: Option<i64>,
        _limit: i64,
    ) -> Result<Vec<FeedEntry>, StoreError> {
        Ok(Vec::new())
    }

    async fn list_feed_by_restaurant(
        &self,
        _restaurant_id: i64,
        _after_id: Option<i64>,
        _limit: i64,
    ) -> Result<Vec<FeedEntry>, StoreError> {
        Ok(Vec::new())
    }

    async fn list_feed_by_following(&self, _viewer: UserId) -> Result<Vec<FeedEntry>, StoreError> {
        Ok(Vec::new())
    }

    async fn insert_like(&self, _user: UserId, _visit_id: i64) -> Result<(), StoreError> {
        Ok(())
    }

    async fn delete_like(&self, _user: UserId, _visit_id: i64) -> Result<(), StoreError> {
        Ok(())
    }

    async fn like_exists(&self, _user: UserId, _visit_id: i64) -> Result<bool, StoreError> {
        Ok(false)
    }
}

/// Follow store for tests that only exercise the feed handlers.
pub struct EmptyFollowStore;

#[async_trait]
impl FollowStore for EmptyFollowStore {
    async fn insert_edge(
        &self,
        _follower: UserId,
        _following: UserId,
    ) -> Result<usize, StoreError> {
        Ok(0)
    }

    async fn delete_edge(
        &self,
        _follower: UserId,
        _following: UserId,
    ) -> Result<usize, StoreError> {
        Ok(0)
    }

    async fn edge_exists(
        &self,
        _follower: UserId,
        _following: UserId,
    ) -> Result<bool, StoreError> {
        Ok(false)
    }

    async fn count_following(&self, _user: UserId) -> Result<i64, StoreError> {
        Ok(0)
    }

    async fn count_followers(&self, _user: UserId) -> Result<i64, StoreError> {
        Ok(0)
    }

    async fn list_following(
        &self,
        _viewer: Option<UserId>,
        _subject: UserId,
        _offset: i64,
        _limit: i64,
    ) -> Result<Vec<FollowListEntry>, StoreError> {
        Ok(Vec::new())
    }

    async fn list_followers(
        &self,
        _viewer: Option<UserId>,
        _subject: UserId,
        _offset: i64,
        _limit: i64,
    ) -> Result<Vec<FollowListEntry>, StoreError> {
        Ok(Vec::new())
    }
}
