//! Diesel-backed persistence adapters for the domain ports.

mod diesel_feed_store;
mod diesel_follow_store;
mod error_mapping;
mod models;
mod pool;
pub mod schema;

pub use diesel_feed_store::DieselFeedStore;
pub use diesel_follow_store::DieselFollowStore;
pub use pool::{DbPool, PoolConfig, PoolError};
