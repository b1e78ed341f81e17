//! Accesor cache-aside para lecturas por id
//!
//! Lee primero de la caché; en miss (o snapshot ilegible) carga desde la
//! fuente de verdad y escribe el registro serializado con TTL fijo. Los
//! errores de caché se registran y nunca se propagan.

use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{CacheStore, NoopCache};
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct CacheAside {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl CacheAside {
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Accesor sin caché (null object)
    pub fn disabled(ttl: Duration) -> Self {
        Self::new(Arc::new(NoopCache), ttl)
    }

    /// Clave determinista `"<tipo>:<id>"`
    pub fn key(kind: &str, id: impl Display) -> String {
        format!("{}:{}", kind, id)
    }

    /// Lectura read-through.
    ///
    /// Un hit devuelve el snapshot sin llamar a `loader`. Los errores de
    /// `loader` (incluido `NotFound`) se devuelven tal cual y no se cachean.
    pub async fn get_or_load<T, F, Fut>(&self, key: &str, loader: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned + Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = AppResult<T>> + Send,
    {
        if let Some(cached) = self.read(key).await {
            return Ok(cached);
        }

        let value = loader().await?;
        self.write(key, &value).await;
        Ok(value)
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("⚠️ Error leyendo cache para clave {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!("📥 Snapshot servido desde cache: {}", key);
                Some(value)
            }
            Err(e) => {
                warn!("⚠️ Snapshot ilegible para clave {}, recargando: {}", key, e);
                None
            }
        }
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T) {
        let serialized = match serde_json::to_string(value) {
            Ok(serialized) => serialized,
            Err(e) => {
                warn!("⚠️ No se pudo serializar {} para cache: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.store.set(key, &serialized, self.ttl).await {
            warn!("⚠️ Error guardando en cache para clave {}: {}", key, e);
        }
    }

    /// Elimina todas las claves que coinciden con el patrón glob.
    ///
    /// Devuelve el número de claves eliminadas (0 si la caché falla).
    pub async fn invalidate_pattern(&self, pattern: &str) -> u64 {
        let keys = match self.store.keys(pattern).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("⚠️ Error listando claves {}: {}", pattern, e);
                return 0;
            }
        };

        if keys.is_empty() {
            return 0;
        }

        match self.store.delete(&keys).await {
            Ok(count) => {
                info!("🗑️ Cache invalidada para {}: {} claves", pattern, count);
                count
            }
            Err(e) => {
                warn!("⚠️ Error eliminando claves {}: {}", pattern, e);
                0
            }
        }
    }
}
