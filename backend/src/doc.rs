//! OpenAPI document for the dashboard HTTP surface.
//!
//! Served by Swagger UI in debug builds and exported by the `openapi-dump`
//! binary.

use crate::domain::feeds::{LocalEvent, NewsItem, WeatherReport};
use crate::domain::lists::{CalendarEvent, ShoppingItem};
use crate::domain::{DashboardView, Error, ErrorCode};
use crate::inbound::http::auth::LoginForm;
use crate::inbound::http::feeds::{NewsResponse, SearchRequest, SearchResponse, WeatherResponse};
use crate::inbound::http::lists::{AddEventRequest, AddItemRequest, DeleteEventRequest};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the session cookie security scheme.
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
                "Encrypted session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the dashboard API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Personal dashboard API",
        description = "Session-authenticated dashboard with weather, news, events, \
                       video search, shopping list and calendar."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::logout,
        crate::inbound::http::dashboard::dashboard,
        crate::inbound::http::dashboard::root,
        crate::inbound::http::feeds::weather,
        crate::inbound::http::feeds::news,
        crate::inbound::http::feeds::events,
        crate::inbound::http::feeds::search,
        crate::inbound::http::lists::add_item,
        crate::inbound::http::lists::reset_items,
        crate::inbound::http::lists::add_event,
        crate::inbound::http::lists::delete_event,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        DashboardView,
        LoginForm,
        WeatherReport,
        WeatherResponse,
        NewsItem,
        NewsResponse,
        LocalEvent,
        SearchRequest,
        SearchResponse,
        ShoppingItem,
        CalendarEvent,
        AddItemRequest,
        AddEventRequest,
        DeleteEventRequest,
    )),
    tags(
        (name = "auth", description = "Registration, login and logout"),
        (name = "dashboard", description = "Signed-in dashboard"),
        (name = "feeds", description = "Weather, news, events and video search"),
        (name = "lists", description = "Shopping list and calendar"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
