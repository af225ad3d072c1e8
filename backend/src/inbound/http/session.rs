//! Session helpers keeping handlers free of cookie-session details.
//!
//! A signed-in session stores the caller's user id, Firebase UID and role.
//! All three must be present and parse, otherwise the request is treated as
//! anonymous.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Caller, Error, FirebaseUid, Role, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const FIREBASE_UID_KEY: &str = "firebase_uid";
pub(crate) const ROLE_KEY: &str = "role";

/// Newtype over the actix session exposing caller-level operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the authenticated caller, rotating the session id.
    pub fn persist_caller(&self, caller: &Caller) -> Result<(), Error> {
        self.0.renew();
        let write = |key: &str, value: String| {
            self.0
                .insert(key, value)
                .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
        };
        write(USER_ID_KEY, caller.user_id.to_string())?;
        write(FIREBASE_UID_KEY, caller.firebase_uid.as_str().to_owned())?;
        write(ROLE_KEY, caller.role.as_str().to_owned())
    }

    fn read(&self, key: &str) -> Result<Option<String>, Error> {
        self.0
            .get::<String>(key)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }

    /// The signed-in caller, if any.
    pub fn caller(&self) -> Result<Option<Caller>, Error> {
        let (Some(user_id), Some(uid), Some(role)) = (
            self.read(USER_ID_KEY)?,
            self.read(FIREBASE_UID_KEY)?,
            self.read(ROLE_KEY)?,
        ) else {
            return Ok(None);
        };
        let parsed = UserId::parse(&user_id).ok().zip(FirebaseUid::new(&uid).ok());
        match (parsed, role.parse::<Role>()) {
            (Some((user_id, firebase_uid)), Ok(role)) => Ok(Some(Caller {
                user_id,
                firebase_uid,
                role,
            })),
            _ => {
                warn!("discarding malformed session cookie");
                Ok(None)
            }
        }
    }

    /// Require a signed-in caller or fail with `401 Unauthorized`.
    pub fn require_caller(&self) -> Result<Caller, Error> {
        self.caller()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop all session state.
    pub fn purge(&self) {
        self.0.purge();
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
