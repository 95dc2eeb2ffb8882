//! Visit-feed use cases.
//!
//! Every cursor listing goes through the same paginator: fetch one row
//! more than the page size, report `has_next_page`, and hand back the id
//! of the last returned row as the next cursor. The following feed is
//! the deliberate exception — it returns the whole result set and must
//! stay unpaginated to preserve its contract.

use std::sync::Arc;

use pagination::{fetch_limit, Cursor, Page, DEFAULT_PAGE_SIZE};
use tracing::debug;

use super::error::DomainError;
use super::feed::{FeedEntry, NewVisit, Visit};
use super::ports::FeedStore;
use super::user::UserId;

/// Which slice of the feed a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFilter {
    /// Every visit.
    All,
    /// Visits authored by one user.
    ByUser(UserId),
    /// Visits of one restaurant.
    ByRestaurant(i64),
}

/// Feed listing, review posting, and like-toggle use cases.
#[derive(Clone)]
pub struct FeedService {
    store: Arc<dyn FeedStore>,
}

impl FeedService {
    /// Create the service over a feed store.
    pub fn new(store: Arc<dyn FeedStore>) -> Self {
        Self { store }
    }

    /// Persist a new visit review.
    ///
    /// Input is stored as given; hardening the payload is an explicit
    /// non-goal of this endpoint.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn post_visit(&self, input: NewVisit) -> Result<Visit, DomainError> {
        let visit = self.store.insert_visit(input).await?;
        debug!(visit_id = visit.id, "visit stored");
        Ok(visit)
    }

    /// One page of the feed selected by `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn list_feed(
        &self,
        filter: FeedFilter,
        cursor: Cursor,
    ) -> Result<Page<FeedEntry>, DomainError> {
        let after = cursor.after_id();
        let limit = fetch_limit(DEFAULT_PAGE_SIZE);
        let rows = match filter {
            FeedFilter::All => self.store.list_feed(after, limit).await?,
            FeedFilter::ByUser(user) => self.store.list_feed_by_user(user, after, limit).await?,
            FeedFilter::ByRestaurant(restaurant_id) => {
                self.store
                    .list_feed_by_restaurant(restaurant_id, after, limit)
                    .await?
            }
        };
        Ok(Page::from_rows(rows, DEFAULT_PAGE_SIZE, |entry| entry.id))
    }

    /// Every visit authored by users the viewer follows, newest first.
    ///
    /// Unbounded by contract: callers get the full result set.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn following_feed(&self, viewer: UserId) -> Result<Vec<FeedEntry>, DomainError> {
        Ok(self.store.list_feed_by_following(viewer).await?)
    }

    /// Set or clear the like edge between `user` and a visit.
    ///
    /// Liking an already-liked visit is a silent no-op; there is no
    /// distinct "already liked" signal, unlike follows.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn toggle_like(
        &self,
        user: UserId,
        visit_id: i64,
        like: bool,
    ) -> Result<(), DomainError> {
        if like {
            self.store.insert_like(user, visit_id).await?;
        } else {
            self.store.delete_like(user, visit_id).await?;
        }
        debug!(%user, visit_id, like, "visit like toggled");
        Ok(())
    }

    /// Whether `user` likes the visit.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn like_status(&self, user: UserId, visit_id: i64) -> Result<bool, DomainError> {
        Ok(self.store.like_exists(user, visit_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::feed::{FeedAuthor, FeedRestaurant};
    use crate::domain::ports::StoreError;

    fn entry(id: i64, user_id: i64) -> FeedEntry {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).single().expect("fixture time");
        FeedEntry {
            id,
            user_id: UserId::new(user_id),
            restaurant_id: 2,
            visit_date: NaiveDate::from_ymd_opt(2026, 1, 1).expect("fixture date"),
            review: format!("review-{id}"),
            created_at: at,
            updated_at: at,
            visit_like_count: 0,
            restaurant: FeedRestaurant {
                name: "Hansik House".to_owned(),
                address: None,
                phone_number: None,
                category: None,
                latitude: 37.49,
                longitude: 127.02,
                kakao_place_id: 12345,
                created_at: at,
                updated_at: at,
                restaurant_like_count: 0,
            },
            user: FeedAuthor {
                nickname: format!("user-{user_id}"),
                profile_image: None,
                introduction: None,
                category: None,
            },
        }
    }

    /// In-memory feed store over a vector of entries and a like set.
    #[derive(Default)]
    struct StubFeedStore {
        state: Mutex<StubState>,
    }

    #[derive(Default)]
    struct StubState {
        entries: Vec<FeedEntry>,
        likes: BTreeSet<(i64, i64)>,
        follows: BTreeSet<(i64, i64)>,
        next_id: i64,
    }

    impl StubFeedStore {
        fn with_entries(count: i64) -> Self {
            let store = Self::default();
            {
                let mut state = store.state.lock().expect("state lock");
                state.entries = (1..=count).rev().map(|id| entry(id, 1)).collect();
                state.next_id = count + 1;
            }
            store
        }

        fn like_count(&self) -> usize {
            self.state.lock().expect("state lock").likes.len()
        }
    }

    fn page_rows(
        entries: &[FeedEntry],
        after_id: Option<i64>,
        limit: i64,
        keep: impl Fn(&FeedEntry) -> bool,
    ) -> Vec<FeedEntry> {
        entries
            .iter()
            .filter(|entry| keep(entry))
            .filter(|entry| after_id.is_none_or(|after| entry.id < after))
            .take(usize::try_from(limit).expect("small limits"))
            .cloned()
            .collect()
    }

    #[async_trait]
    impl FeedStore for StubFeedStore {
        async fn insert_visit(&self, visit: NewVisit) -> Result<Visit, StoreError> {
            let mut state = self.state.lock().expect("state lock");
            let id = state.next_id.max(1);
            state.next_id = id + 1;
            let mut stored = entry(id, visit.user_id.value());
            stored.restaurant_id = visit.restaurant_id;
            stored.visit_date = visit.visit_date;
            stored.review.clone_from(&visit.review);
            state.entries.insert(0, stored.clone());
            Ok(Visit {
                id: stored.id,
                user_id: stored.user_id,
                restaurant_id: stored.restaurant_id,
                visit_date: stored.visit_date,
                review: stored.review,
                created_at: stored.created_at,
                updated_at: stored.updated_at,
            })
        }

        async fn list_feed(
            &self,
            after_id: Option<i64>,
            limit: i64,
        ) -> Result<Vec<FeedEntry>, StoreError> {
            let state = self.state.lock().expect("state lock");
            Ok(page_rows(&state.entries, after_id, limit, |_| true))
        }

        async fn list_feed_by_user(
            &self,
            user: UserId,
            after_id: Option<i64>,
            limit: i64,
        ) -> Result<Vec<FeedEntry>, StoreError> {
            let state = self.state.lock().expect("state lock");
            Ok(page_rows(&state.entries, after_id, limit, |entry| {
                entry.user_id == user
            }))
        }

        async fn list_feed_by_restaurant(
            &self,
            restaurant_id: i64,
            after_id: Option<i64>,
            limit: i64,
        ) -> Result<Vec<FeedEntry>, StoreError> {
            let state = self.state.lock().expect("state lock");
            Ok(page_rows(&state.entries, after_id, limit, |entry| {
                entry.restaurant_id == restaurant_id
            }))
        }

        async fn list_feed_by_following(
            &self,
            viewer: UserId,
        ) -> Result<Vec<FeedEntry>, StoreError> {
            let state = self.state.lock().expect("state lock");
            let followed: BTreeSet<i64> = state
                .follows
                .iter()
                .filter(|(follower, _)| *follower == viewer.value())
                .map(|(_, following)| *following)
                .collect();
            Ok(state
                .entries
                .iter()
                .filter(|entry| followed.contains(&entry.user_id.value()))
                .cloned()
                .collect())
        }

        async fn insert_like(&self, user: UserId, visit_id: i64) -> Result<(), StoreError> {
            let mut state = self.state.lock().expect("state lock");
            // Duplicate inserts are swallowed, like the unique-constraint
            // conflict in the real store.
            state.likes.insert((user.value(), visit_id));
            Ok(())
        }

        async fn delete_like(&self, user: UserId, visit_id: i64) -> Result<(), StoreError> {
            let mut state = self.state.lock().expect("state lock");
            state.likes.remove(&(user.value(), visit_id));
            Ok(())
        }

        async fn like_exists(&self, user: UserId, visit_id: i64) -> Result<bool, StoreError> {
            let state = self.state.lock().expect("state lock");
            Ok(state.likes.contains(&(user.value(), visit_id)))
        }
    }

    fn service_over(store: StubFeedStore) -> (FeedService, Arc<StubFeedStore>) {
        let store = Arc::new(store);
        (FeedService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn first_page_of_a_long_feed_reports_a_next_page() {
        let (service, _) = service_over(StubFeedStore::with_entries(25));

        let page = service
            .list_feed(FeedFilter::All, Cursor::start())
            .await
            .expect("listing succeeds");

        assert_eq!(page.data.len(), DEFAULT_PAGE_SIZE);
        assert!(page.has_next_page);
        // Newest first: ids 25..16, so the cursor points at 16.
        assert_eq!(page.next_cursor, Some(16));
    }

    #[rstest]
    #[case(10)]
    #[case(3)]
    #[case(0)]
    #[tokio::test]
    async fn short_feeds_fit_in_one_final_page(#[case] count: i64) {
        let (service, _) = service_over(StubFeedStore::with_entries(count));

        let page = service
            .list_feed(FeedFilter::All, Cursor::start())
            .await
            .expect("listing succeeds");

        assert_eq!(page.data.len(), usize::try_from(count).expect("small count"));
        assert!(!page.has_next_page);
        assert_eq!(page.next_cursor, None);
    }

    #[tokio::test]
    async fn walking_the_cursor_enumerates_every_visit_exactly_once() {
        let (service, _) = service_over(StubFeedStore::with_entries(23));

        let mut seen = Vec::new();
        let mut cursor = Cursor::start();
        loop {
            let page = service
                .list_feed(FeedFilter::All, cursor)
                .await
                .expect("listing succeeds");
            seen.extend(page.data.iter().map(|entry| entry.id));
            match page.next_cursor {
                Some(next) => cursor = Cursor::after(next).expect("cursors are row ids"),
                None => break,
            }
        }

        let expected: Vec<i64> = (1..=23).rev().collect();
        assert_eq!(seen, expected);
    }

    #[tokio::test]
    async fn posted_visit_shows_up_in_the_feed_with_zero_likes() {
        let (service, _) = service_over(StubFeedStore::default());

        let visit = service
            .post_visit(NewVisit {
                user_id: UserId::new(1),
                restaurant_id: 2,
                visit_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("fixture date"),
                review: "x".to_owned(),
            })
            .await
            .expect("post succeeds");

        let page = service
            .list_feed(FeedFilter::All, Cursor::start())
            .await
            .expect("listing succeeds");

        let found = page
            .data
            .iter()
            .find(|entry| entry.id == visit.id)
            .expect("posted visit is listed");
        assert_eq!(found.user_id, UserId::new(1));
        assert_eq!(found.restaurant_id, 2);
        assert_eq!(found.visit_like_count, 0);
        assert_eq!(found.review, "x");
    }

    #[tokio::test]
    async fn user_and_restaurant_filters_reach_the_matching_rows() {
        let (service, store) = service_over(StubFeedStore::default());
        {
            let mut state = store.state.lock().expect("state lock");
            let mut a = entry(3, 1);
            a.restaurant_id = 7;
            state.entries = vec![a, entry(2, 2), entry(1, 1)];
        }

        let by_user = service
            .list_feed(FeedFilter::ByUser(UserId::new(1)), Cursor::start())
            .await
            .expect("listing succeeds");
        let ids: Vec<i64> = by_user.data.iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![3, 1]);

        let by_restaurant = service
            .list_feed(FeedFilter::ByRestaurant(7), Cursor::start())
            .await
            .expect("listing succeeds");
        let ids: Vec<i64> = by_restaurant.data.iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[tokio::test]
    async fn double_like_stays_liked_without_duplicates() {
        let (service, store) = service_over(StubFeedStore::with_entries(1));
        let user = UserId::new(4);

        service.toggle_like(user, 1, true).await.expect("like");
        service.toggle_like(user, 1, true).await.expect("re-like");

        assert!(service.like_status(user, 1).await.expect("status"));
        assert_eq!(store.like_count(), 1);

        service.toggle_like(user, 1, false).await.expect("unlike");
        assert!(!service.like_status(user, 1).await.expect("status"));
    }

    #[tokio::test]
    async fn following_feed_returns_only_followed_authors_unpaginated() {
        let (service, store) = service_over(StubFeedStore::default());
        {
            let mut state = store.state.lock().expect("state lock");
            // 15 visits by user 2 and one by user 3; viewer 1 follows 2.
            state.entries = (1..=15)
                .rev()
                .map(|id| entry(id, 2))
                .chain(std::iter::once(entry(16, 3)))
                .collect();
            state.follows.insert((1, 2));
        }

        let feed = service
            .following_feed(UserId::new(1))
            .await
            .expect("listing succeeds");

        // No page cap applies to the following feed.
        assert_eq!(feed.len(), 15);
        assert!(feed.iter().all(|entry| entry.user_id == UserId::new(2)));
    }
}
