//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers only deal with establishing,
//! reading, and clearing the authenticated identity. The cookie store keeps
//! no server-side state, so each session carries its own expiry instant and
//! is checked against [`SessionLifetime`] on every read.

use std::sync::Arc;

use actix_session::Session;
use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use mockable::{Clock, DefaultClock};
use tracing::{debug, warn};

use super::session_config::DEFAULT_SESSION_TTL_MINUTES;
use crate::domain::{AuthenticatedUser, Error};

pub(crate) const USERNAME_KEY: &str = "username";
pub(crate) const PROFILE_PHOTO_KEY: &str = "profile_photo";
pub(crate) const EXPIRES_AT_KEY: &str = "expires_at";

/// How long an established session stays valid and the clock it is
/// measured against.
///
/// Registered as `web::Data<SessionLifetime>`; without it sessions last
/// the default two hours on the system clock.
#[derive(Clone)]
pub struct SessionLifetime {
    ttl_secs: i64,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl SessionLifetime {
    pub fn new(ttl: CookieDuration, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            ttl_secs: ttl.whole_seconds(),
            clock,
        }
    }

    fn now(&self) -> i64 {
        self.clock.utc().timestamp()
    }

    fn from_app_data(data: Option<&web::Data<Self>>) -> Self {
        data.map_or_else(Self::default, |lifetime| lifetime.get_ref().clone())
    }
}

impl Default for SessionLifetime {
    fn default() -> Self {
        Self::new(
            CookieDuration::minutes(DEFAULT_SESSION_TTL_MINUTES),
            Arc::new(DefaultClock),
        )
    }
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext {
    session: Session,
    lifetime: SessionLifetime,
}

impl SessionContext {
    /// Wrap the Actix session with the lifetime registered on the app.
    pub fn new(session: Session, lifetime: Option<&web::Data<SessionLifetime>>) -> Self {
        Self {
            session,
            lifetime: SessionLifetime::from_app_data(lifetime),
        }
    }

    /// Start a fresh session for `user`, dropping any prior state.
    ///
    /// The session key is renewed so a cookie issued before login cannot be
    /// replayed afterwards.
    pub fn establish(&self, user: &AuthenticatedUser) -> Result<(), Error> {
        let expires_at = self.lifetime.now().saturating_add(self.lifetime.ttl_secs);
        self.session.clear();
        self.session.renew();
        self.session
            .insert(USERNAME_KEY, user.username())
            .and_then(|()| self.session.insert(PROFILE_PHOTO_KEY, user.profile_photo()))
            .and_then(|()| self.session.insert(EXPIRES_AT_KEY, expires_at))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The identity carried by the session, if it is complete, decodable and
    /// not yet expired.
    pub fn current(&self) -> Option<AuthenticatedUser> {
        let username = self.read::<String>(USERNAME_KEY)?;
        let photo = self.read::<String>(PROFILE_PHOTO_KEY)?;
        let expires_at = self.read::<i64>(EXPIRES_AT_KEY)?;
        if username.trim().is_empty() {
            return None;
        }
        if self.lifetime.now() >= expires_at {
            debug!("ignoring expired session");
            return None;
        }
        Some(AuthenticatedUser::new(username, Some(photo)))
    }

    /// Drop the session and expire the cookie.
    pub fn clear(&self) {
        self.session.purge();
    }

    fn read<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.session.get::<T>(key) {
            Ok(value) => value,
            Err(error) => {
                warn!(key, error = %error, "discarding undecodable session entry");
                None
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let lifetime = SessionLifetime::from_app_data(req.app_data::<web::Data<SessionLifetime>>());
        let fut = Session::from_request(req, payload);
        Box::pin(async move {
            fut.await.map(|session| SessionContext { session, lifetime })
        })
    }
}
