//! Cache
//!
//! Este módulo contiene el puerto de caché clave/valor, sus implementaciones
//! (Redis, memoria, no-op) y el accesor cache-aside de lecturas por id.
//!
//! La caché es solo un acelerador: ningún error de caché llega al llamador.

pub mod cache_aside;
pub mod cache_config;
pub mod memory_cache;
pub mod noop_cache;
pub mod redis_client;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::CacheBackend;

pub use cache_aside::CacheAside;
pub use cache_config::CacheConfig;
pub use memory_cache::MemoryCache;
pub use noop_cache::NoopCache;
pub use redis_client::RedisClient;

/// Errores del almacén de caché. Nunca se propagan fuera de `CacheAside`.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Invalid key pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),
}

/// Almacén clave/valor con TTL
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// `Ok(None)` cuando la clave no existe o expiró
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Claves que coinciden con un patrón glob (`vehicle:*`)
    async fn keys(&self, pattern: &str) -> Result<Vec<String>, CacheError>;

    /// Devuelve cuántas claves se eliminaron
    async fn delete(&self, keys: &[String]) -> Result<u64, CacheError>;

    fn backend_name(&self) -> &'static str;
}

/// Construir el almacén de caché configurado.
///
/// Si Redis no responde al arrancar se usa `NoopCache`: el servicio sigue
/// funcionando solo con PostgreSQL.
pub async fn build_cache_store(backend: &CacheBackend, config: &CacheConfig) -> Arc<dyn CacheStore> {
    match backend {
        CacheBackend::Redis(url) => match RedisClient::connect(url, config).await {
            Ok(client) => Arc::new(client),
            Err(e) => {
                warn!("⚠️ No se pudo conectar a Redis, continuando sin caché: {}", e);
                Arc::new(NoopCache)
            }
        },
        CacheBackend::Memory => {
            info!("🧠 Usando caché en memoria");
            Arc::new(MemoryCache::new())
        }
        CacheBackend::None => {
            info!("🚫 Caché deshabilitada");
            Arc::new(NoopCache)
        }
    }
}
