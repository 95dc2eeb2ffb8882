//! Transport-agnostic core: types, errors, ports, and services.
//!
//! The domain holds no state of its own — every read goes back to the
//! store, and the database's constraints are the source of truth for
//! the follow and like edge invariants.

mod error;
mod feed;
mod feed_service;
mod follow;
mod follow_service;
pub mod ports;
mod user;

pub use error::{DomainError, ErrorCode};
pub use feed::{FeedAuthor, FeedEntry, FeedRestaurant, NewVisit, Visit};
pub use feed_service::{FeedFilter, FeedService};
pub use follow::FollowListEntry;
pub use follow_service::{FollowService, DEFAULT_LIST_LIMIT};
pub use user::{category_from_db, Category, ParseCategoryError, UserId};
