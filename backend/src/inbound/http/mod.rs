//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod follows;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod visits;

pub use error::ApiResult;

use actix_web::web;

/// Register every route on an Actix service config.
///
/// The literal-prefixed follow listings are registered before the
/// parametrised `/follows/{id}` routes so `followings`/`followers` are
/// never captured as a user id.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(follows::list_followings)
        .service(follows::list_followers)
        .service(follows::following_count)
        .service(follows::follower_count)
        .service(follows::follow)
        .service(follows::unfollow)
        .service(follows::follow_status)
        .service(visits::post_visit)
        .service(visits::like_visit)
        .service(visits::unlike_visit)
        .service(visits::like_status)
        .service(visits::following_feed)
        .service(visits::list_visits);
}
