//! Builders wiring outbound adapters into handler state.

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use dashboard::domain::ports::CredentialStore;
use dashboard::domain::{AccountService, ReminderSweep};
use dashboard::inbound::http::state::{HttpState, HttpStateFeeds, HttpStatePorts};
use dashboard::outbound::files::{
    FileCalendarStore, FilePhotoStore, FileShoppingListStore, open_dir,
};
use dashboard::outbound::http::{
    OpenWeatherMap, RssNews, TicketmasterEvents, YoutubeSearch, build_client,
};
use dashboard::outbound::memory::InMemoryCredentialStore;
use dashboard::outbound::persistence::{DbPool, DieselCredentialStore, PoolConfig};
use dashboard::outbound::security::Argon2PasswordHasher;

use super::config::AppSettings;

/// Handler state plus the background reminder task sharing its stores.
pub struct AppPorts {
    pub http_state: web::Data<HttpState>,
    pub reminders: ReminderSweep,
}

async fn build_credential_store(settings: &AppSettings) -> io::Result<Arc<dyn CredentialStore>> {
    let Some(url) = settings.database_url.as_deref() else {
        warn!("DASHBOARD_DATABASE_URL not set; users are kept in memory and lost on restart");
        return Ok(Arc::new(InMemoryCredentialStore::new()));
    };
    let timeout = settings.db_timeout();
    let pool = DbPool::new(PoolConfig::new(url).with_connection_timeout(timeout))
        .await
        .map_err(|err| io::Error::other(err.to_string()))?;
    info!("credential store backed by PostgreSQL");
    Ok(Arc::new(DieselCredentialStore::new(pool, timeout)))
}

fn build_feeds(settings: &AppSettings) -> io::Result<HttpStateFeeds> {
    let client = build_client(settings.http_timeout())
        .map_err(|err| io::Error::other(format!("http client: {err}")))?;
    if settings.weather_api_key.is_none() {
        warn!("DASHBOARD_WEATHER_API_KEY not set; weather requests will fail");
    }
    if settings.events_api_key.is_none() {
        warn!("DASHBOARD_EVENTS_API_KEY not set; events will be empty");
    }
    Ok(HttpStateFeeds {
        weather: Arc::new(OpenWeatherMap::new(
            client.clone(),
            settings.weather_api_key.clone(),
        )),
        news: Arc::new(RssNews::new(client.clone(), settings.news_feed_url.clone())),
        events: Arc::new(TicketmasterEvents::new(
            client.clone(),
            settings.events_api_key.clone(),
        )),
        videos: Arc::new(YoutubeSearch::new(client)),
    })
}

/// Open storage, connect to the database when configured, and assemble the
/// handler state.
///
/// # Errors
/// Fails when a directory cannot be created or opened, the pool cannot be
/// built, or the HTTP client cannot be constructed.
pub async fn build_app_ports(settings: &AppSettings) -> io::Result<AppPorts> {
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(DefaultClock);
    let data_dir = Arc::new(open_dir(&settings.data_dir())?);
    let upload_dir = Arc::new(open_dir(&settings.upload_dir())?);

    let store = build_credential_store(settings).await?;
    let photos = Arc::new(FilePhotoStore::new(upload_dir, Arc::clone(&clock)));
    let accounts = Arc::new(AccountService::new(
        store,
        Arc::new(Argon2PasswordHasher),
        photos,
    ));
    let shopping = Arc::new(FileShoppingListStore::new(Arc::clone(&data_dir)));
    let calendar = Arc::new(FileCalendarStore::new(data_dir, Arc::clone(&clock)));

    let ports = HttpStatePorts {
        login: accounts.clone(),
        registration: accounts,
        shopping: shopping.clone(),
        calendar: calendar.clone(),
    };
    let http_state = web::Data::new(HttpState::new(ports, build_feeds(settings)?));
    let reminders = ReminderSweep::new(calendar, shopping, clock);

    Ok(AppPorts {
        http_state,
        reminders,
    })
}
