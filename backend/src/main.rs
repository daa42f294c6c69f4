//! Backend entry-point: loads settings, wires adapters and serves the REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use command_center::domain::FixtureStore;
use command_center::inbound::http::auth::SyncSecret;
use command_center::inbound::http::health::HealthState;
use command_center::settings::AppSettings;

use server::{ServerConfig, build_ports, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let mut settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let bind_addr = settings.bind_addr()?;
    let store = Arc::new(FixtureStore::seeded().wrap_err("failed to load fixtures")?);
    let ports = build_ports(&settings)?;
    let sync_secret = settings.sync_secret().and_then(SyncSecret::new);
    if sync_secret.is_none() {
        warn!("sync secret not set; POST /api/sync will answer 503");
    }
    let config = ServerConfig::new(
        bind_addr,
        store,
        ports,
        settings.tracked_team_id(),
        Arc::new(DefaultClock),
    )
    .with_sync_secret(sync_secret);
    settings.scrub();

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "command center listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result.wrap_err("server terminated with an error")
}
