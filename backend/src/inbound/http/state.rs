//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CalendarStore, EventsSource, FixtureFeeds, LoginService, NewsSource, RegistrationService,
    ShoppingListStore, VideoSearch, WeatherSource,
};

/// Parameter object bundling the account and list ports.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub shopping: Arc<dyn ShoppingListStore>,
    pub calendar: Arc<dyn CalendarStore>,
}

/// Third-party feed ports.
///
/// Defaults to [`FixtureFeeds`] for every source.
#[derive(Clone)]
pub struct HttpStateFeeds {
    pub weather: Arc<dyn WeatherSource>,
    pub news: Arc<dyn NewsSource>,
    pub events: Arc<dyn EventsSource>,
    pub videos: Arc<dyn VideoSearch>,
}

impl Default for HttpStateFeeds {
    fn default() -> Self {
        Self {
            weather: Arc::new(FixtureFeeds),
            news: Arc::new(FixtureFeeds),
            events: Arc::new(FixtureFeeds),
            videos: Arc::new(FixtureFeeds),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub shopping: Arc<dyn ShoppingListStore>,
    pub calendar: Arc<dyn CalendarStore>,
    pub weather: Arc<dyn WeatherSource>,
    pub news: Arc<dyn NewsSource>,
    pub events: Arc<dyn EventsSource>,
    pub videos: Arc<dyn VideoSearch>,
}

impl HttpState {
    /// Construct state from the account/list ports and the feed ports.
    pub fn new(ports: HttpStatePorts, feeds: HttpStateFeeds) -> Self {
        let HttpStatePorts {
            login,
            registration,
            shopping,
            calendar,
        } = ports;
        let HttpStateFeeds {
            weather,
            news,
            events,
            videos,
        } = feeds;
        Self {
            login,
            registration,
            shopping,
            calendar,
            weather,
            news,
            events,
            videos,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports, HttpStateFeeds::default())
    }
}
