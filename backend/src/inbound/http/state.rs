//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend
//! only on the domain services and stay testable without I/O.

use std::sync::Arc;

use crate::domain::{FeedService, FollowService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub follows: Arc<FollowService>,
    pub feed: Arc<FeedService>,
}

impl HttpState {
    /// Bundle the domain services for injection into handlers.
    pub fn new(follows: FollowService, feed: FeedService) -> Self {
        Self {
            follows: Arc::new(follows),
            feed: Arc::new(feed),
        }
    }
}
