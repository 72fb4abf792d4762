//! Typed access to the login session.
//!
//! Handlers never touch raw cookie keys: [`SessionContext`] extracts from the
//! request the way [`Session`] does, stores the signed-in [`UserId`] on
//! login, and hands guarded endpoints either that id or a `403` before any
//! use-case code runs.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Request extractor giving handlers typed access to the session cookie.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an already-extracted Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record the authenticated user's id in the session cookie.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.get())
            .map_err(|error| Error::internal(format!("session write failed: {error}")))
    }

    /// Fetch the authenticated user id, if any.
    ///
    /// An unreadable or non-positive stored id is treated as logged out
    /// rather than an error: the cookie is signed, so such values can only
    /// come from stale or mismatched server-side writes.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        let raw = match self.0.get::<i32>(USER_ID_KEY) {
            Ok(value) => value?,
            Err(error) => {
                warn!(%error, "unreadable session user id; treating as logged out");
                return None;
            }
        };
        match UserId::new(raw) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "session carried an invalid user id; treating as logged out");
                None
            }
        }
    }

    /// Resolve the signed-in user or fail with `403 Forbidden`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()
            .ok_or_else(|| Error::forbidden("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = Session::from_request(req, payload);
        Box::pin(async move { session.await.map(Self::new) })
    }
}
