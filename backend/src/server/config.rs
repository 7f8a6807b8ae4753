//! Application settings and the HTTP server configuration object.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use dashboard::inbound::http::session_config::SessionSettings;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_UPLOAD_DIR: &str = "static/uploads";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 5;
const DEFAULT_REMINDER_INTERVAL_SECS: u64 = 60;

/// Settings loaded from CLI flags, `DASHBOARD_*` environment variables and
/// configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DASHBOARD")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it users live in memory.
    pub database_url: Option<String>,
    /// Directory holding `shopping_list.json` and `calendar.json`.
    pub data_dir: Option<PathBuf>,
    /// Directory receiving profile photos.
    pub upload_dir: Option<PathBuf>,
    pub weather_api_key: Option<String>,
    pub events_api_key: Option<String>,
    /// RSS feed URL for headlines.
    pub news_feed_url: Option<String>,
    pub http_timeout_secs: Option<u64>,
    pub db_timeout_secs: Option<u64>,
    /// Seconds between reminder sweeps; `0` disables the sweep.
    pub reminder_interval_secs: Option<u64>,
}

impl AppSettings {
    /// Parse the bind address, falling back to `0.0.0.0:5000`.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address '{raw}': {err}"),
            )
        })
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.upload_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR))
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS))
    }

    pub fn db_timeout(&self) -> Duration {
        Duration::from_secs(self.db_timeout_secs.unwrap_or(DEFAULT_DB_TIMEOUT_SECS))
    }

    /// Reminder period, or `None` when sweeps are disabled.
    pub fn reminder_interval(&self) -> Option<Duration> {
        let secs = self
            .reminder_interval_secs
            .unwrap_or(DEFAULT_REMINDER_INTERVAL_SECS);
        (secs > 0).then(|| Duration::from_secs(secs))
    }
}

/// Everything `create_server` needs besides handler state.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self { session, bind_addr }
    }
}
