//! Follow-graph HTTP handlers.
//!
//! ```text
//! POST   /follows/{id}                  Follow a user
//! DELETE /follows/{id}                  Unfollow a user
//! GET    /follows/{id}                  Does the session user follow {id}?
//! GET    /follows/{id}/following-count  How many users {id} follows
//! GET    /follows/{id}/follower-count   How many users follow {id}
//! GET    /follows/followings/{id}       Page of users {id} follows
//! GET    /follows/followers/{id}        Page of users following {id}
//! ```
//!
//! Mutations and the status check resolve the acting user from the
//! signed session cookie. The listings take an optional session viewer,
//! used only to annotate each entry with whether the viewer follows
//! that user.

use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{DomainError, FollowListEntry, UserId, DEFAULT_LIST_LIMIT};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Page selector for the follower/following listings.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// 1-based page number; defaults to the first page.
    pub page: Option<i64>,
    /// Page length; defaults to 10.
    pub limit: Option<i64>,
}

/// Response body for the follow-status check.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowStatusResponse {
    /// Whether the session user follows the path user.
    pub is_follow: bool,
}

/// Response body for the count endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct CountResponse {
    /// Number of edges in the requested direction.
    pub count: i64,
}

/// Follow the user named in the path.
#[utoipa::path(
    post,
    path = "/follows/{id}",
    params(("id" = i64, Path, description = "User to follow")),
    responses(
        (status = 200, description = "Follow recorded"),
        (status = 400, description = "Self-follow or malformed id", body = DomainError),
        (status = 401, description = "No session", body = DomainError),
        (status = 409, description = "Already following, or target missing", body = DomainError)
    ),
    tags = ["follows"],
    operation_id = "follow"
)]
#[post("/follows/{id}")]
pub async fn follow(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let me = session.require_user_id()?;
    state.follows.follow(me, UserId::new(*path)).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Unfollow the user named in the path.
#[utoipa::path(
    delete,
    path = "/follows/{id}",
    params(("id" = i64, Path, description = "User to unfollow")),
    responses(
        (status = 200, description = "Follow removed"),
        (status = 400, description = "Self-unfollow or malformed id", body = DomainError),
        (status = 401, description = "No session", body = DomainError),
        (status = 409, description = "Not currently following", body = DomainError)
    ),
    tags = ["follows"],
    operation_id = "unfollow"
)]
#[delete("/follows/{id}")]
pub async fn unfollow(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let me = session.require_user_id()?;
    state.follows.unfollow(me, UserId::new(*path)).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Whether the session user follows the user named in the path.
#[utoipa::path(
    get,
    path = "/follows/{id}",
    params(("id" = i64, Path, description = "User to check")),
    responses(
        (status = 200, description = "Follow status", body = FollowStatusResponse),
        (status = 400, description = "Same user on both sides", body = DomainError),
        (status = 401, description = "No session", body = DomainError)
    ),
    tags = ["follows"],
    operation_id = "followStatus"
)]
#[get("/follows/{id}")]
pub async fn follow_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<FollowStatusResponse>> {
    let me = session.require_user_id()?;
    let is_follow = state.follows.is_follow(me, UserId::new(*path)).await?;
    Ok(web::Json(FollowStatusResponse { is_follow }))
}

/// How many users the path user follows.
#[utoipa::path(
    get,
    path = "/follows/{id}/following-count",
    params(("id" = i64, Path, description = "Subject user")),
    responses((status = 200, description = "Following count", body = CountResponse)),
    tags = ["follows"],
    operation_id = "followingCount"
)]
#[get("/follows/{id}/following-count")]
pub async fn following_count(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CountResponse>> {
    let count = state.follows.following_count(UserId::new(*path)).await?;
    Ok(web::Json(CountResponse { count }))
}

/// How many users follow the path user.
#[utoipa::path(
    get,
    path = "/follows/{id}/follower-count",
    params(("id" = i64, Path, description = "Subject user")),
    responses((status = 200, description = "Follower count", body = CountResponse)),
    tags = ["follows"],
    operation_id = "followerCount"
)]
#[get("/follows/{id}/follower-count")]
pub async fn follower_count(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CountResponse>> {
    let count = state.follows.follower_count(UserId::new(*path)).await?;
    Ok(web::Json(CountResponse { count }))
}

fn page_and_limit(query: &ListQuery) -> (i64, i64) {
    (
        query.page.unwrap_or(1),
        query.limit.unwrap_or(DEFAULT_LIST_LIMIT),
    )
}

/// One page of users the path user follows.
#[utoipa::path(
    get,
    path = "/follows/followings/{id}",
    params(("id" = i64, Path, description = "Subject user"), ListQuery),
    responses(
        (status = 200, description = "Annotated page", body = [FollowListEntry]),
        (status = 400, description = "Non-positive page or limit", body = DomainError)
    ),
    tags = ["follows"],
    operation_id = "listFollowings"
)]
#[get("/follows/followings/{id}")]
pub async fn list_followings(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<Vec<FollowListEntry>>> {
    let viewer = session.user_id()?;
    let (page, limit) = page_and_limit(&query);
    let entries = state
        .follows
        .followings(viewer, UserId::new(*path), page, limit)
        .await?;
    Ok(web::Json(entries))
}

/// One page of users following the path user.
#[utoipa::path(
    get,
    path = "/follows/followers/{id}",
    params(("id" = i64, Path, description = "Subject user"), ListQuery),
    responses(
        (status = 200, description = "Annotated page", body = [FollowListEntry]),
        (status = 400, description = "Non-positive page or limit", body = DomainError)
    ),
    tags = ["follows"],
    operation_id = "listFollowers"
)]
#[get("/follows/followers/{id}")]
pub async fn list_followers(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<Vec<FollowListEntry>>> {
    let viewer = session.user_id()?;
    let (page, limit) = page_and_limit(&query);
    let entries = state
        .follows
        .followers(viewer, UserId::new(*path), page, limit)
        .await?;
    Ok(web::Json(entries))
}
