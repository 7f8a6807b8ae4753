//! HTTP inbound adapter: handlers, session plumbing and the access gate.
//!
//! [`configure`] registers every route. The caller supplies the session
//! middleware, [`state::HttpState`] and [`health::HealthState`].

use actix_web::web;

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod feeds;
pub mod gate;
pub mod health;
pub mod lists;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use crate::domain::ApiResult;

/// Register all dashboard routes and the extractor error settings.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::query_config())
        .app_data(validation::multipart_config())
        .app_data(auth::login_form_config())
        .service(auth::login)
        .service(auth::signup)
        .service(auth::logout)
        .configure(dashboard::configure)
        .service(feeds::weather)
        .service(feeds::news)
        .service(feeds::events)
        .service(feeds::search)
        .service(lists::add_item)
        .service(lists::reset_items)
        .service(lists::add_event)
        .service(lists::delete_event)
        .service(health::ready)
        .service(health::live);
}
