use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisResult};
use std::time::Duration;
use tracing::{debug, info};

use super::{CacheConfig, CacheError, CacheStore};

/// Cliente Redis con connection pooling y operaciones async
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
}

impl RedisClient {
    /// Crear nuevo cliente Redis y verificar la conexión con PING
    pub async fn connect(redis_url: &str, config: &CacheConfig) -> Result<Self, CacheError> {
        info!("🔗 Conectando a Redis: {}", redis_url);

        let client = redis::Client::open(redis_url)?;
        let manager = tokio::time::timeout(config.connect_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| CacheError::Unavailable(format!("timeout conectando a {}", redis_url)))??;

        let mut conn = manager.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");
        Ok(Self { manager })
    }
}

#[async_trait]
impl CacheStore for RedisClient {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.manager.clone();

        let value: Option<String> = conn.get(key).await?;
        match &value {
            Some(_) => debug!("📥 Cache HIT para clave: {}", key),
            None => debug!("❌ Cache MISS para clave: {}", key),
        }
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();

        let seconds = ttl.as_secs().max(1);
        let result: RedisResult<()> = conn.set_ex(key, value, seconds).await;
        result?;

        debug!("💾 Cache SET para clave: {} (TTL: {}s)", key, seconds);
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, CacheError> {
        let mut conn = self.manager.clone();

        let keys: Vec<String> = conn.keys(pattern).await?;
        debug!("🔍 Cache KEYS {}: {} claves", pattern, keys.len());
        Ok(keys)
    }

    async fn delete(&self, keys: &[String]) -> Result<u64, CacheError> {
        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.manager.clone();
        let count: u64 = conn.del(keys).await?;

        debug!("🗑️ Cache DELETE: {} claves eliminadas", count);
        Ok(count)
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
