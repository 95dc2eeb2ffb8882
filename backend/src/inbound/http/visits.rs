//! Visit-feed HTTP handlers.
//!
//! ```text
//! POST   /visits               Post a visit review
//! GET    /visits               Cursor-paginated feed (all / by user / by restaurant)
//! GET    /visits/following     Unpaginated feed of followed users' visits
//! POST   /visits/likes         Like a visit
//! DELETE /visits/likes         Unlike a visit
//! GET    /visits/likes/status  Does the user like the visit?
//! ```
//!
//! The three paginated listings share one query surface: `?userId=` and
//! `?restaurantId=` narrow the feed and are mutually exclusive, and
//! `?cursor=` carries the id returned as `nextCursor` by the previous
//! page. An unparsable cursor restarts from the newest visit.

use actix_web::{delete, get, post, web, HttpResponse};
use pagination::{Cursor, Page};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{DomainError, FeedEntry, FeedFilter, NewVisit, UserId, Visit};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Query surface of the paginated feed listings.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct FeedQuery {
    /// Narrow the feed to one author. Exclusive with `restaurantId`.
    pub user_id: Option<i64>,
    /// Narrow the feed to one restaurant. Exclusive with `userId`.
    pub restaurant_id: Option<i64>,
    /// Keyset cursor from the previous page's `nextCursor`.
    pub cursor: Option<String>,
}

/// Query surface of the following feed.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct FollowingFeedQuery {
    /// The viewer whose followed users' visits are listed.
    pub user_id: Option<i64>,
}

/// Request body for like and unlike.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    /// The liking user.
    pub user_id: UserId,
    /// The liked visit.
    pub visit_id: i64,
}

/// Query surface of the like-status check.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatusQuery {
    /// The user whose like is checked.
    pub user_id: Option<i64>,
    /// The visit being checked.
    pub visit_id: Option<i64>,
}

/// Creation envelope returned by the review-posting endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct VisitCreatedResponse {
    /// Always `true`; retained for client compatibility.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// The stored visit.
    pub data: Visit,
}

/// Confirmation body for the like mutations.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// Response body for the like-status check.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatusResponse {
    /// Whether the like edge exists.
    pub is_liked: bool,
}

fn missing_parameter(name: &str) -> DomainError {
    DomainError::invalid_request(format!("query parameter {name} is required"))
}

fn filter_from_query(query: &FeedQuery) -> Result<FeedFilter, DomainError> {
    match (query.user_id, query.restaurant_id) {
        (Some(_), Some(_)) => Err(DomainError::invalid_request(
            "userId and restaurantId are mutually exclusive",
        )),
        (Some(user_id), None) => Ok(FeedFilter::ByUser(UserId::new(user_id))),
        (None, Some(restaurant_id)) => Ok(FeedFilter::ByRestaurant(restaurant_id)),
        (None, None) => Ok(FeedFilter::All),
    }
}

/// Post a visit review.
#[utoipa::path(
    post,
    path = "/visits",
    request_body = NewVisit,
    responses(
        (status = 201, description = "Review stored", body = VisitCreatedResponse),
        (status = 503, description = "Storage unavailable", body = DomainError)
    ),
    tags = ["visits"],
    operation_id = "postVisit"
)]
#[post("/visits")]
pub async fn post_visit(
    state: web::Data<HttpState>,
    payload: web::Json<NewVisit>,
) -> ApiResult<HttpResponse> {
    let visit = state.feed.post_visit(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(VisitCreatedResponse {
        success: true,
        message: "visit review stored".to_owned(),
        data: visit,
    }))
}

/// One page of the visit feed, newest first.
#[utoipa::path(
    get,
    path = "/visits",
    params(FeedQuery),
    responses(
        (status = 200, description = "Feed page", body = Page<FeedEntry>),
        (status = 400, description = "Conflicting filters", body = DomainError)
    ),
    tags = ["visits"],
    operation_id = "listVisits"
)]
#[get("/visits")]
pub async fn list_visits(
    state: web::Data<HttpState>,
    query: web::Query<FeedQuery>,
) -> ApiResult<web::Json<Page<FeedEntry>>> {
    let filter = filter_from_query(&query)?;
    let cursor = Cursor::parse(query.cursor.as_deref());
    let page = state.feed.list_feed(filter, cursor).await?;
    Ok(web::Json(page))
}

/// Every visit authored by users the viewer follows.
#[utoipa::path(
    get,
    path = "/visits/following",
    params(FollowingFeedQuery),
    responses(
        (status = 200, description = "Followed users' visits", body = [FeedEntry]),
        (status = 400, description = "Missing userId", body = DomainError)
    ),
    tags = ["visits"],
    operation_id = "followingFeed"
)]
#[get("/visits/following")]
pub async fn following_feed(
    state: web::Data<HttpState>,
    query: web::Query<FollowingFeedQuery>,
) -> ApiResult<web::Json<Vec<FeedEntry>>> {
    let viewer = query.user_id.ok_or_else(|| missing_parameter("userId"))?;
    let entries = state.feed.following_feed(UserId::new(viewer)).await?;
    Ok(web::Json(entries))
}

/// Like a visit. Liking an already-liked visit is a silent no-op.
#[utoipa::path(
    post,
    path = "/visits/likes",
    request_body = LikeRequest,
    responses((status = 201, description = "Like recorded", body = MessageResponse)),
    tags = ["visits"],
    operation_id = "likeVisit"
)]
#[post("/visits/likes")]
pub async fn like_visit(
    state: web::Data<HttpState>,
    payload: web::Json<LikeRequest>,
) -> ApiResult<HttpResponse> {
    state
        .feed
        .toggle_like(payload.user_id, payload.visit_id, true)
        .await?;
    Ok(HttpResponse::Created().json(MessageResponse {
        message: "like recorded".to_owned(),
    }))
}

/// Remove a like from a visit.
#[utoipa::path(
    delete,
    path = "/visits/likes",
    request_body = LikeRequest,
    responses((status = 200, description = "Like removed", body = MessageResponse)),
    tags = ["visits"],
    operation_id = "unlikeVisit"
)]
#[delete("/visits/likes")]
pub async fn unlike_visit(
    state: web::Data<HttpState>,
    payload: web::Json<LikeRequest>,
) -> ApiResult<HttpResponse> {
    state
        .feed
        .toggle_like(payload.user_id, payload.visit_id, false)
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "like removed".to_owned(),
    }))
}

/// Whether the user likes the visit.
#[utoipa::path(
    get,
    path = "/visits/likes/status",
    params(LikeStatusQuery),
    responses(
        (status = 200, description = "Like status", body = LikeStatusResponse),
        (status = 400, description = "Missing parameters", body = DomainError)
    ),
    tags = ["visits"],
    operation_id = "likeStatus"
)]
#[get("/visits/likes/status")]
pub async fn like_status(
    state: web::Data<HttpState>,
    query: web::Query<LikeStatusQuery>,
) -> ApiResult<web::Json<LikeStatusResponse>> {
    let user_id = query.user_id.ok_or_else(|| missing_parameter("userId"))?;
    let visit_id = query.visit_id.ok_or_else(|| missing_parameter("visitId"))?;
    let is_liked = state
        .feed
        .like_status(UserId::new(user_id), visit_id)
        .await?;
    Ok(web::Json(LikeStatusResponse { is_liked }))
}
