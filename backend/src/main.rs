//! Dashboard entry-point: loads settings, wires adapters and starts the
//! HTTP server alongside the reminder sweep.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use dashboard::inbound::http::health::HealthState;
use dashboard::inbound::http::session_config::fingerprint::key_fingerprint;
use dashboard::inbound::http::session_config::{BuildMode, session_settings_from_env};
use server::{AppPorts, AppSettings, ServerConfig, build_app_ports, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        ttl_minutes = session.ttl.whole_minutes(),
        "session key loaded"
    );

    let bind_addr = settings.bind_addr()?;
    let AppPorts {
        http_state,
        reminders,
    } = build_app_ports(&settings).await?;

    let reminder_task = settings.reminder_interval().map(|period| {
        info!(period_secs = period.as_secs(), "starting reminder sweep");
        actix_web::rt::spawn(reminders.run(period))
    });

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        http_state,
        ServerConfig::new(session, bind_addr),
    )?;
    info!(%bind_addr, "dashboard listening");

    let result = server.await;
    health_state.mark_unhealthy();
    if let Some(task) = reminder_task {
        task.abort();
    }
    result
}
