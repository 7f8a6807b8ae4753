//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::web;
use std::sync::Arc;

use super::state::{HttpState, HttpStateFeeds, HttpStatePorts};
use crate::domain::ports::{
    MockCalendarStore, MockLoginService, MockRegistrationService, MockShoppingListStore,
};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The non-empty `session` cookie set by `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session" && !cookie.value().is_empty())
        .map(Cookie::into_owned)
}

/// Mock-backed ports for handler tests.
///
/// Unconfigured mocks panic when called, so each test only sets expectations
/// on the ports it exercises.
#[derive(Default)]
pub struct TestPorts {
    pub login: MockLoginService,
    pub registration: MockRegistrationService,
    pub shopping: MockShoppingListStore,
    pub calendar: MockCalendarStore,
    pub feeds: Option<HttpStateFeeds>,
}

impl TestPorts {
    /// Assemble handler state from the configured mocks.
    pub fn into_state(self) -> web::Data<HttpState> {
        let ports = HttpStatePorts {
            login: Arc::new(self.login),
            registration: Arc::new(self.registration),
            shopping: Arc::new(self.shopping),
            calendar: Arc::new(self.calendar),
        };
        web::Data::new(HttpState::new(ports, self.feeds.unwrap_or_default()))
    }
}

/// Encode `fields` and an optional `(file_name, bytes)` photo as a
/// `multipart/form-data` body, returning the content type and payload.
pub fn multipart_body(
    fields: &[(&str, &str)],
    photo: Option<(&str, &[u8])>,
) -> (String, Vec<u8>) {
    const BOUNDARY: &str = "----dashboard-test-boundary";
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = photo {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"profilePhoto\"; \
                 filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
