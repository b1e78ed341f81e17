//! Cache nula: el servicio funciona igual cuando no hay backend de caché.

use async_trait::async_trait;
use std::time::Duration;

use super::{CacheError, CacheStore};

/// Todas las lecturas fallan en silencio (miss) y las escrituras no hacen nada
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

#[async_trait]
impl CacheStore for NoopCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }

    async fn keys(&self, _pattern: &str) -> Result<Vec<String>, CacheError> {
        Ok(Vec::new())
    }

    async fn delete(&self, _keys: &[String]) -> Result<u64, CacheError> {
        Ok(0)
    }

    fn backend_name(&self) -> &'static str {
        "noop"
    }
}
