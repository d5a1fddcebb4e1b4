use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::redis::{RedisHandle, RedisHealth};
use crate::repositories::StoreResult;
use crate::schemas::session::SessionData;

const KEY_PREFIX: &str = "session:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SessionHealth {
    Healthy,
    Degraded(String),
}

#[async_trait]
pub(crate) trait SessionStore: Send + Sync {
    async fn load(&self, session_id: &str) -> StoreResult<Option<SessionData>>;

    /// Replace the whole session and restart its time-to-live.
    async fn save(&self, session_id: &str, data: &SessionData) -> StoreResult<()>;

    async fn health(&self) -> SessionHealth;

    fn backend(&self) -> &'static str;
}

pub(crate) struct RedisSessionStore {
    redis: RedisHandle,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    pub(crate) fn new(redis: RedisHandle, ttl_seconds: u64) -> Self {
        Self { redis, ttl_seconds }
    }
}

fn key(session_id: &str) -> String {
    format!("{KEY_PREFIX}{session_id}")
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, session_id: &str) -> StoreResult<Option<SessionData>> {
        let Some(raw) = self.redis.get(&key(session_id)).await? else {
            return Ok(None);
        };

        Ok(Some(serde_json::from_str(&raw)?))
    }

    async fn save(&self, session_id: &str, data: &SessionData) -> StoreResult<()> {
        let raw = serde_json::to_string(data)?;
        self.redis.set_ex(&key(session_id), &raw, self.ttl_seconds).await?;
        Ok(())
    }

    async fn health(&self) -> SessionHealth {
        match self.redis.health().await {
            RedisHealth::Healthy => SessionHealth::Healthy,
            RedisHealth::Disconnected => SessionHealth::Degraded("disconnected".to_string()),
            RedisHealth::Unhealthy(error) => SessionHealth::Degraded(format!("unhealthy: {error}")),
        }
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

/// Process-local sessions. Lost on restart and not shared between replicas.
pub(crate) struct MemorySessionStore {
    ttl: Duration,
    entries: RwLock<HashMap<String, (SessionData, Option<Instant>)>>,
}

/// `None` never expires: the TTL reaches past what `Instant` can represent.
fn is_live(expires_at: Option<Instant>, now: Instant) -> bool {
    expires_at.map_or(true, |expires_at| expires_at > now)
}

impl MemorySessionStore {
    pub(crate) fn new(ttl_seconds: u64) -> Self {
        Self { ttl: Duration::from_secs(ttl_seconds), entries: RwLock::new(HashMap::new()) }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, session_id: &str) -> StoreResult<Option<SessionData>> {
        let entries = self.entries.read().await;
        let data = entries
            .get(session_id)
            .filter(|(_, expires_at)| is_live(*expires_at, Instant::now()))
            .map(|(data, _)| data.clone());
        Ok(data)
    }

    async fn save(&self, session_id: &str, data: &SessionData) -> StoreResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, (_, expires_at)| is_live(*expires_at, now));
        entries.insert(session_id.to_string(), (data.clone(), now.checked_add(self.ttl)));
        Ok(())
    }

    async fn health(&self) -> SessionHealth {
        SessionHealth::Healthy
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
