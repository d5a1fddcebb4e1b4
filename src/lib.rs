pub(crate) mod api;
pub(crate) mod core;
pub(crate) mod db;
pub(crate) mod repositories;
pub(crate) mod schemas;
pub(crate) mod services;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use crate::core::{
    config::{SessionBackend, Settings},
    redis::RedisHandle,
    state::AppState,
    telemetry,
};
use crate::repositories::quizzes::PgQuizStore;
use crate::repositories::sessions::{MemorySessionStore, RedisSessionStore, SessionStore};
use crate::services::randomness;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init_tracing(&settings)?;
    core::metrics::init(&settings)?;

    let db_pool = db::init_pool(&settings).await?;
    db::run_migrations(&db_pool).await?;

    let redis = RedisHandle::new(settings.redis().redis_url());
    let sessions = session_store(&settings, &redis).await;
    let random = randomness::from_seed(settings.random_play().seed);

    let state =
        AppState::new(settings, Arc::new(PgQuizStore::new(db_pool)), sessions, random);

    let app = api::router::router(state.clone());
    let listener = tokio::net::TcpListener::bind(state.settings().server_addr()).await?;

    tracing::info!(
        host = %state.settings().server_host(),
        port = state.settings().server_port(),
        environment = %state.settings().runtime().environment.as_str(),
        sessions = state.sessions().backend(),
        "Quiz server listening"
    );

    let result =
        axum::serve(listener, app).with_graceful_shutdown(core::shutdown::shutdown_signal()).await;

    redis.disconnect().await;
    tracing::info!("Redis disconnected");

    result?;

    Ok(())
}

async fn session_store(settings: &Settings, redis: &RedisHandle) -> Arc<dyn SessionStore> {
    let ttl_seconds = settings.session().ttl_seconds;
    tracing::debug!(
        backend = settings.session().backend.as_str(),
        ttl_seconds,
        "configuring session store"
    );

    match settings.session().backend {
        SessionBackend::Memory => Arc::new(MemorySessionStore::new(ttl_seconds)),
        SessionBackend::Redis => match redis.connect().await {
            Ok(()) => {
                tracing::info!("Redis connected successfully");
                Arc::new(RedisSessionStore::new(redis.clone(), ttl_seconds))
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    "Failed to connect to Redis; keeping sessions in process memory"
                );
                Arc::new(MemorySessionStore::new(ttl_seconds))
            }
        },
    }
}
