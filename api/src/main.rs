use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};

use auth_api::app::create_app;
use auth_api::config::load_config;
use auth_api::routes::auth::AppState;
use auth_api::telemetry::init_tracing;
use auth_core::services::{KeyCustodian, KeyRotationService, SessionService};
use auth_infra::cache::{RedisClient, RedisRefreshStore};
use auth_infra::database::{DatabasePool, MySqlUserRepository};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = load_config().context("failed to load configuration")?;
    init_tracing(&config.logging)?;

    info!(environment = %config.environment, "Starting authentication service");

    // Key generation is CPU bound; keep it off the runtime threads
    let key_config = config.auth.keys.clone();
    let custodian = tokio::task::spawn_blocking(move || KeyCustodian::from_config(&key_config))
        .await
        .context("key loading task failed")?
        .context("failed to load signing keys")?;
    let custodian = Arc::new(custodian);
    info!(kid = %custodian.current_key_id(), "Signing key ready");

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to database")?;
    pool.ensure_schema()
        .await
        .context("failed to prepare database schema")?;

    let redis = RedisClient::new(config.cache.clone())
        .await
        .context("failed to connect to redis")?;

    let user_repository = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let refresh_store = Arc::new(RedisRefreshStore::new(redis));
    let session_service = Arc::new(SessionService::from_config(
        user_repository,
        refresh_store,
        custodian.clone(),
        &config.auth,
    ));

    let rotation = KeyRotationService::from_config(custodian, &config.auth.keys)
        .map(|service| Arc::new(service).start_background_task());
    if rotation.is_none() {
        info!("Signing key rotation disabled");
    }

    let app_state = web::Data::new(AppState::new(session_service));
    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Binding HTTP server");

    let mut server = HttpServer::new(move || create_app(app_state.clone()))
        .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let result = server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await;

    if let Some(handle) = rotation {
        handle.abort();
    }
    pool.close().await;

    if let Err(e) = &result {
        warn!(error = %e, "HTTP server stopped with error");
    }
    result.context("HTTP server failed")
}
