//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix session so handlers deal only in domain-friendly
//! operations: persisting a user id after login and resolving the acting
//! user for requests. Follow mutations trust the signed cookie, never a
//! caller-supplied id in the body.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::domain::{DomainError, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    ///
    /// # Errors
    ///
    /// `InternalError` when the value cannot be written to the session.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), DomainError> {
        self.0
            .insert(USER_ID_KEY, user_id.value())
            .map_err(|error| DomainError::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    ///
    /// # Errors
    ///
    /// `InternalError` when the session payload cannot be read.
    pub fn user_id(&self) -> Result<Option<UserId>, DomainError> {
        let id = self
            .0
            .get::<i64>(USER_ID_KEY)
            .map_err(|error| DomainError::internal(format!("failed to read session: {error}")))?;
        Ok(id.map(UserId::new))
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    ///
    /// # Errors
    ///
    /// `Unauthorized` when no session user is present.
    pub fn require_user_id(&self) -> Result<UserId, DomainError> {
        self.user_id()?
            .ok_or_else(|| DomainError::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
