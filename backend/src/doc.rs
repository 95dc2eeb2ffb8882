//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct that generates the OpenAPI
//! specification for the REST API: every follow and visit endpoint from
//! the inbound layer, the shared domain schemas, and the session cookie
//! security scheme. Swagger UI serves the document in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Category, DomainError, ErrorCode, FeedAuthor, FeedEntry, FeedRestaurant, FollowListEntry,
    NewVisit, Visit,
};
use crate::inbound::http::follows::{CountResponse, FollowStatusResponse};
use crate::inbound::http::visits::{
    LikeRequest, LikeStatusResponse, MessageResponse, VisitCreatedResponse,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Signed session cookie carrying the acting user id.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Matzip backend API",
        description = "Follow graph and visit feed for the restaurant review app.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::follows::follow,
        crate::inbound::http::follows::unfollow,
        crate::inbound::http::follows::follow_status,
        crate::inbound::http::follows::following_count,
        crate::inbound::http::follows::follower_count,
        crate::inbound::http::follows::list_followings,
        crate::inbound::http::follows::list_followers,
        crate::inbound::http::visits::post_visit,
        crate::inbound::http::visits::list_visits,
        crate::inbound::http::visits::following_feed,
        crate::inbound::http::visits::like_visit,
        crate::inbound::http::visits::unlike_visit,
        crate::inbound::http::visits::like_status,
    ),
    components(schemas(
        DomainError,
        ErrorCode,
        Category,
        FollowListEntry,
        FollowStatusResponse,
        CountResponse,
        Visit,
        NewVisit,
        FeedEntry,
        FeedRestaurant,
        FeedAuthor,
        pagination::Page<FeedEntry>,
        VisitCreatedResponse,
        MessageResponse,
        LikeRequest,
        LikeStatusResponse,
    )),
    tags(
        (name = "follows", description = "Follow graph operations"),
        (name = "visits", description = "Visit reviews, feeds, and likes")
    )
)]
pub struct ApiDoc;
