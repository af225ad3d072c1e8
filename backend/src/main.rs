//! Backend entry-point: loads settings, migrates the schema and serves the
//! REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use learners_backend::inbound::http::health::HealthState;
use learners_backend::inbound::http::session_config::{BuildMode, session_settings};
use learners_backend::outbound::cloudinary::CloudinaryFileStore;
use learners_backend::outbound::firebase::FirebaseIdTokenVerifier;
use learners_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use learners_backend::settings::AppSettings;

use server::{ExternalAdapters, ServerConfig, create_server, drain_on, shutdown_signal};

fn startup_error(context: &str, error: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {error}"))
}

async fn migrate(database_url: &str) -> std::io::Result<()> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .map_err(|error| startup_error("migration task failed", error))?
        .map_err(|error| startup_error("database migration", error))?;
    Ok(())
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

    let settings = AppSettings::load().map_err(|error| startup_error("settings", error))?;
    let session = session_settings(
        &settings.session_inputs(),
        BuildMode::from_debug_assertions(),
    )
    .map_err(|error| startup_error("session configuration", error))?;

    let database_url = settings
        .database_url()
        .map_err(|error| startup_error("settings", error))?;
    migrate(database_url).await?;
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await
    .map_err(|error| startup_error("database pool", error))?;

    let firebase = settings
        .firebase_config()
        .map_err(|error| startup_error("settings", error))?;
    let verifier = FirebaseIdTokenVerifier::new(firebase)
        .map_err(|error| startup_error("identity verifier", error))?;
    let cloudinary = settings
        .cloudinary_config()
        .map_err(|error| startup_error("settings", error))?;
    let store = CloudinaryFileStore::new(cloudinary, Arc::new(DefaultClock))
        .map_err(|error| startup_error("file store", error))?;

    let config = ServerConfig::new(
        session,
        settings.bind_addr(),
        ExternalAdapters {
            pool,
            verifier: Arc::new(verifier),
            store: Arc::new(store),
        },
    )
    .with_upload_limit(settings.max_upload_bytes());
    info!(bind_addr = %config.bind_addr(), "starting HTTP server");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on(shutdown_signal(), health_state, server.handle()));
    server.await
}
