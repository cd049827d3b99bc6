//! Backend entry-point: loads settings, prepares the store and serves the
//! REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use travel_backend::inbound::http::health::HealthState;
use travel_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use travel_backend::settings::ServerSettings;

/// Apply embedded migrations on a blocking thread.
async fn migrate(database_url: &str) -> std::io::Result<()> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .map_err(|err| std::io::Error::other(format!("migration task failed: {err}")))?
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    info!(applied, "database schema is up to date");
    Ok(())
}

async fn build_config(settings: &ServerSettings) -> std::io::Result<ServerConfig> {
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
    let config = ServerConfig::new(bind_addr);

    let Some(database_url) = settings.database_url() else {
        warn!("TRAVEL_DATABASE_URL is not set; using the in-memory store");
        return Ok(config);
    };

    if settings.run_migrations {
        migrate(database_url).await?;
    }
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections),
    )
    .await
    .map_err(|err| std::io::Error::other(err.to_string()))?;
    Ok(config.with_db_pool(pool))
}

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

    let settings = ServerSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let config = build_config(&settings).await?;
    info!(bind_addr = %config.bind_addr(), "starting server");

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
