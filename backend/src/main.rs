//! Backend entry-point: loads configuration and starts the HTTP server.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::config::{AppSettings, BuildMode, load_signing_key};
use backend::inbound::http::health::HealthState;
use backend::outbound::cache::RedisSnapshotCache;
use backend::outbound::persistence::{DbPool, PoolConfig};
use backend::server::{self, ServerConfig};

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

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("configuration load failed: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let bootstrap_admin = settings
        .bootstrap_admin()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let signing_key = load_signing_key(
        &settings.token_key_path(),
        BuildMode::from_debug_assertions(),
        settings.allow_ephemeral_key,
    )
    .map_err(|e| std::io::Error::other(e.to_string()))?;

    let db_pool = match settings.database_url.as_deref() {
        Some(url) => {
            server::run_migrations(url)?;
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(|e| std::io::Error::other(format!("database pool failed: {e}")))?;
            Some(pool)
        }
        None => {
            warn!("no database configured; serving fixture data");
            None
        }
    };

    let snapshot_cache = match settings.redis_url.as_deref() {
        Some(url) => {
            let cache = RedisSnapshotCache::connect(url)
                .await
                .map_err(|e| std::io::Error::other(format!("redis connection failed: {e}")))?;
            Some(cache)
        }
        None => None,
    };
    if db_pool.is_none() && snapshot_cache.is_some() {
        warn!("redis configured without a database; snapshot cache is unused");
    }

    match (&db_pool, &bootstrap_admin) {
        (Some(pool), Some(admin)) => server::seed_bootstrap_admin(pool, admin).await?,
        (None, Some(_)) => warn!("bootstrap admin configured without a database; skipping seed"),
        _ => {}
    }

    let mut config = ServerConfig::new(signing_key, settings.access_token_ttl(), bind_addr);
    if let Some(pool) = db_pool {
        config = config.with_db_pool(pool);
    }
    if let Some(cache) = snapshot_cache {
        config = config.with_snapshot_cache(cache);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
