//! Backend entry-point: loads settings, prepares storage and signing keys,
//! then serves the REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use civicflow_backend::TraceId;
use civicflow_backend::inbound::http::health::HealthState;
use civicflow_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use civicflow_backend::outbound::security::{BuildMode, JwtTokenIssuer, load_signing_key};
use server::{ServerConfig, Settings, create_server};

/// Apply pending migrations on a blocking thread, then open the async pool.
async fn connect_database(url: &str, max_connections: u32) -> std::io::Result<DbPool> {
    let migration_url = url.to_owned();
    let trace_id = TraceId::generate();
    tokio::task::spawn_blocking(move || {
        TraceId::sync_scope(trace_id, || run_migrations(&migration_url))
    })
    .await
    .map_err(|err| std::io::Error::other(format!("migration task failed: {err}")))?
    .map_err(|err| std::io::Error::other(format!("database migration failed: {err}")))?;

    let pool = DbPool::new(PoolConfig::new(url).with_max_size(max_connections))
        .await
        .map_err(|err| std::io::Error::other(format!("database pool setup failed: {err}")))?;
    info!(max_connections, "database pool ready");
    Ok(pool)
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

    let settings = Settings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let jwt_config = settings.jwt_config().map_err(std::io::Error::other)?;

    let key = load_signing_key(
        settings.jwt_secret_file.as_deref(),
        settings.allow_ephemeral_key,
        BuildMode::from_debug_assertions(),
    )
    .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %key.fingerprint(),
        issuer = %jwt_config.issuer,
        "token signing key loaded"
    );
    let tokens = Arc::new(JwtTokenIssuer::new(&key, jwt_config));
    drop(key);

    let mut config = ServerConfig::new(bind_addr, tokens);
    if let Some(url) = settings.database_url() {
        let pool = connect_database(url, settings.database_max_connections()).await?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
