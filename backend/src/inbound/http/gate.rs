//! Access gate for routes that require a signed-in user.
//!
//! [`RequireSession`] resolves the session before the wrapped service runs.
//! Without a complete session the request is answered with `401` and the
//! login-required dashboard view, and the wrapped service is never called.
//! Otherwise the identity is placed in request extensions, where handlers
//! read it through [`CurrentSession`].

use std::ops::Deref;
use std::task::{Context, Poll};

use actix_session::SessionExt;
use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{FromRequest, HttpMessage, HttpRequest, HttpResponse, web};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use super::session::{SessionContext, SessionLifetime};
use crate::domain::{AuthenticatedUser, DashboardView, Error, LOGIN_REQUIRED_MESSAGE};

/// Middleware factory guarding a scope or resource.
///
/// Must sit inside the session middleware.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequireSession;

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware { service }))
    }
}

/// Service wrapper produced by [`RequireSession`].
pub struct RequireSessionMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let lifetime = req.app_data::<web::Data<SessionLifetime>>();
        let Some(user) = SessionContext::new(req.get_session(), lifetime).current() else {
            debug!(path = %req.path(), "rejecting request without session");
            let response = HttpResponse::Unauthorized().json(DashboardView::login_required());
            return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
        };

        req.extensions_mut().insert(user);
        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}

/// Identity resolved by [`RequireSession`] for the current request.
#[derive(Debug, Clone)]
pub struct CurrentSession(AuthenticatedUser);

impl Deref for CurrentSession {
    type Target = AuthenticatedUser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentSession {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedUser>()
                .cloned()
                .map(CurrentSession)
                .ok_or_else(|| Error::unauthorized(LOGIN_REQUIRED_MESSAGE)),
        )
    }
}
